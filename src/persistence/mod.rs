mod prefs;

pub use prefs::FilePreferenceStore;

/// StatusStore trait abstracts the string key-value store that holds
/// per-visit statuses, shaped like the browser's local storage so an
/// in-memory fake substitutes cleanly in tests.
pub trait StatusStore {
    /// Returns the value stored under a key.
    ///
    /// # Arguments
    /// * `key` - The key to look up.
    ///
    /// # Returns
    /// The stored value, or None when the key is absent.
    fn get(&self, key: &str) -> Option<String>;

    /// Stores a value under a key, replacing any previous value.
    ///
    /// # Arguments
    /// * `key` - The key to store under.
    /// * `value` - The value to store.
    fn set(&mut self, key: &str, value: &str);

    /// Removes the entry under a key, if present.
    ///
    /// # Arguments
    /// * `key` - The key to remove.
    fn remove(&mut self, key: &str);

    /// Returns every key currently present, in no particular order.
    fn keys(&self) -> Vec<String>;
}

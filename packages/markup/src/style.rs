use serde::{Deserialize, Serialize};
use std::fmt;

/// Ordered inline style declarations (`key: value; ...`).
///
/// Values are kept verbatim, so symbolic values such as `@resources/<id>`
/// survive a parse/print cycle untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StyleMap {
    declarations: Vec<(String, String)>,
}

impl StyleMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse the contents of a `style` attribute.
    ///
    /// Declarations are split on `;`, and each one on its first `:` only, so
    /// values like `url(https://...)` stay intact. Declarations missing either
    /// side are dropped.
    pub fn parse(source: &str) -> Self {
        let mut styles = StyleMap::new();
        for declaration in source.split(';') {
            let Some((key, value)) = declaration.split_once(':') else {
                continue;
            };
            let key = key.trim();
            let value = value.trim();
            if key.is_empty() || value.is_empty() {
                continue;
            }
            styles.set(key, value);
        }
        styles
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.declarations
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Insert or overwrite. Existing keys keep their position.
    pub fn set(&mut self, key: &str, value: impl Into<String>) {
        let value = value.into();
        match self.declarations.iter_mut().find(|(k, _)| k == key) {
            Some((_, v)) => *v = value,
            None => self.declarations.push((key.to_string(), value)),
        }
    }

    pub fn remove(&mut self, key: &str) -> Option<String> {
        let pos = self.declarations.iter().position(|(k, _)| k == key)?;
        Some(self.declarations.remove(pos).1)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.declarations
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.declarations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.declarations.is_empty()
    }
}

impl fmt::Display for StyleMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (key, value)) in self.declarations.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{}: {};", key, value)?;
        }
        Ok(())
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for StyleMap {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut styles = StyleMap::new();
        for (key, value) in iter {
            let key: String = key.into();
            styles.set(&key, value);
        }
        styles
    }
}

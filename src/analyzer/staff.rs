use serde::{Deserialize, Serialize};

/// Ordered roster of staff names. Position is priority: when a text mentions
/// several rostered names, the earliest roster entry wins.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "Vec<String>", into = "Vec<String>")]
pub struct StaffRoster {
    names: Vec<String>,
}

impl From<Vec<String>> for StaffRoster {
    /// Trims entries, drops blanks and keeps only the first occurrence of a name.
    fn from(raw: Vec<String>) -> Self {
        let mut names: Vec<String> = Vec::with_capacity(raw.len());
        for name in raw {
            let name = name.trim();
            if !name.is_empty() && !names.iter().any(|n| n == name) {
                names.push(name.to_string());
            }
        }
        StaffRoster { names }
    }
}

impl From<StaffRoster> for Vec<String> {
    fn from(roster: StaffRoster) -> Self {
        roster.names
    }
}

impl StaffRoster {
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::from(names.into_iter().map(Into::into).collect::<Vec<String>>())
    }

    /// First roster name contained in `text` (case-sensitive substring, no
    /// word boundary: names are often glued to particles in Korean text).
    pub fn detect(&self, text: Option<&str>) -> Option<&str> {
        let text = text?;
        self.names
            .iter()
            .find(|name| text.contains(name.as_str()))
            .map(String::as_str)
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

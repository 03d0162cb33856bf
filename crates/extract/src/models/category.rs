use super::IndexEntry;

/// A named, ordered group of index entries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Category {
    pub label: String,
    pub entries: Vec<IndexEntry>,
}

/// Every category of a bundle, in the order the index first mentions them.
///
/// Labels are unique and each entry belongs to exactly one category. The
/// original index order of the entries is kept alongside the grouping, since
/// attribution of content to categories walks the index in that order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategoryMap {
    categories: Vec<Category>,
    // (category position, entry position within that category), in index order.
    sequence: Vec<(usize, usize)>,
}
impl CategoryMap {
    pub fn from_entries(entries: impl IntoIterator<Item = IndexEntry>) -> Self {
        let mut map = Self::default();
        for entry in entries {
            let position = match map.position(entry.category_label()) {
                Some(position) => position,
                None => {
                    map.categories.push(Category {
                        label: entry.category_label().to_string(),
                        entries: Vec::new(),
                    });
                    map.categories.len() - 1
                },
            };
            let category = &mut map.categories[position];
            map.sequence.push((position, category.entries.len()));
            category.entries.push(entry);
        }
        map
    }

    fn position(&self, label: &str) -> Option<usize> {
        self.categories.iter().position(|category| category.label == label)
    }

    pub fn get(&self, label: &str) -> Option<&Category> {
        self.categories.iter().find(|category| category.label == label)
    }

    pub fn contains(&self, label: &str) -> bool {
        self.position(label).is_some()
    }

    /// Category labels in first-seen order.
    pub fn labels(&self) -> Vec<String> {
        self.categories.iter().map(|category| category.label.clone()).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Category> {
        self.categories.iter()
    }

    /// Entries in original index order, paired with their category position.
    pub(crate) fn indexed(&self) -> impl Iterator<Item = (usize, &IndexEntry)> {
        self.sequence.iter().map(|&(category, entry)| (category, &self.categories[category].entries[entry]))
    }

    pub fn len(&self) -> usize {
        self.categories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }
}
impl From<Vec<IndexEntry>> for CategoryMap {
    fn from(entries: Vec<IndexEntry>) -> Self {
        Self::from_entries(entries)
    }
}

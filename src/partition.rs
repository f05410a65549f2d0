//! Section partitioning for character grids
//!
//! Splits an ordered dataset into one or two sections, each laid out with
//! its own column count:
//! - more than 46 entries: first 46 at 5 columns, the rest at 4 columns
//! - exactly 46 entries (a full kana chart): two halves of 23 at 5 columns
//! - fewer: everything in one section at 5 columns
//!
//! Sections borrow from the dataset. Concatenating their entries always
//! reproduces the input in order.

/// Size of the basic Hiragana/Katakana syllabary
pub const SYLLABARY_SIZE: usize = 46;

/// Column count for the lead section and for small datasets
pub const DENSE_COLUMNS: u16 = 5;

/// Column count for entries past the lead section
pub const WIDE_COLUMNS: u16 = 4;

/// One labeled record. The partitioner never looks at `attributes`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry<A> {
    pub label: String,
    pub attributes: A,
}

impl<A> Entry<A> {
    pub fn new(label: impl Into<String>, attributes: A) -> Self {
        Self {
            label: label.into(),
            attributes,
        }
    }
}

/// A contiguous slice of the dataset rendered under one column count
#[derive(Debug, PartialEq, Eq)]
pub struct Section<'a, A> {
    /// Index of the first entry within the dataset
    pub offset: usize,
    pub entries: &'a [Entry<A>],
    pub columns: u16,
}

// Derived Clone/Copy would require `A: Clone`; a section is only a borrow.
impl<A> Clone for Section<'_, A> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<A> Copy for Section<'_, A> {}

impl<'a, A> Section<'a, A> {
    fn new(offset: usize, entries: &'a [Entry<A>], columns: u16) -> Self {
        Self {
            offset,
            entries,
            columns,
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of grid rows needed for this section
    pub fn rows(&self) -> usize {
        self.entries.len().div_ceil(self.columns as usize)
    }
}

/// Partition `entries` into display sections.
///
/// Always returns one or two sections. An empty dataset yields a single
/// empty section at 5 columns.
pub fn partition<A>(entries: &[Entry<A>]) -> Vec<Section<'_, A>> {
    let total = entries.len();

    if total > SYLLABARY_SIZE {
        let (lead, rest) = entries.split_at(SYLLABARY_SIZE);
        return vec![
            Section::new(0, lead, DENSE_COLUMNS),
            Section::new(SYLLABARY_SIZE, rest, WIDE_COLUMNS),
        ];
    }

    if total == SYLLABARY_SIZE {
        let mid = total.div_ceil(2);
        let (first, second) = entries.split_at(mid);
        return vec![
            Section::new(0, first, DENSE_COLUMNS),
            Section::new(mid, second, DENSE_COLUMNS),
        ];
    }

    vec![Section::new(0, entries, DENSE_COLUMNS)]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dataset(n: usize) -> Vec<Entry<usize>> {
        (0..n).map(|i| Entry::new(format!("e{i}"), i)).collect()
    }

    fn shape<A>(sections: &[Section<'_, A>]) -> Vec<(usize, usize, u16)> {
        sections
            .iter()
            .map(|s| (s.offset, s.len(), s.columns))
            .collect()
    }

    #[test]
    fn test_empty_dataset() {
        let data = dataset(0);
        let sections = partition(&data);
        assert_eq!(sections.len(), 1);
        assert!(sections[0].is_empty());
        assert_eq!(sections[0].columns, 5);
        assert_eq!(sections[0].rows(), 0);
    }

    #[test]
    fn test_small_dataset_single_section() {
        let data = dataset(10);
        let sections = partition(&data);
        assert_eq!(shape(&sections), vec![(0, 10, 5)]);
        assert_eq!(sections[0].entries, &data[..]);
    }

    #[test]
    fn test_just_below_syllabary() {
        let data = dataset(45);
        assert_eq!(shape(&partition(&data)), vec![(0, 45, 5)]);
    }

    #[test]
    fn test_syllabary_splits_in_halves() {
        let data = dataset(46);
        let sections = partition(&data);
        assert_eq!(shape(&sections), vec![(0, 23, 5), (23, 23, 5)]);
        assert_eq!(sections[0].entries, &data[0..23]);
        assert_eq!(sections[1].entries, &data[23..46]);
    }

    #[test]
    fn test_one_past_syllabary() {
        let data = dataset(47);
        let sections = partition(&data);
        assert_eq!(shape(&sections), vec![(0, 46, 5), (46, 1, 4)]);
        assert_eq!(sections[1].entries[0].label, "e46");
    }

    #[test]
    fn test_double_syllabary() {
        let data = dataset(92);
        let sections = partition(&data);
        assert_eq!(shape(&sections), vec![(0, 46, 5), (46, 46, 4)]);
        assert_eq!(sections[1].rows(), 12);
    }

    #[test]
    fn test_concatenation_reproduces_dataset() {
        for n in 0..=3000 {
            let data = dataset(n);
            let sections = partition(&data);

            assert!(matches!(sections.len(), 1 | 2), "n = {n}");
            assert!(sections.iter().all(|s| s.columns == 4 || s.columns == 5));

            let joined: Vec<&Entry<usize>> =
                sections.iter().flat_map(|s| s.entries.iter()).collect();
            assert_eq!(joined.len(), n);
            assert!(joined.iter().zip(&data).all(|(a, b)| *a == b), "n = {n}");

            // Offsets line up with the slices they describe
            for s in &sections {
                assert_eq!(s.entries, &data[s.offset..s.offset + s.len()]);
            }
        }
    }

    #[test]
    fn test_repeated_calls_agree() {
        let data = dataset(120);
        let first = partition(&data);
        let second = partition(&data);
        assert_eq!(first, second);
    }

    #[test]
    fn test_attributes_are_passed_through() {
        #[derive(Debug, PartialEq)]
        struct Opaque(&'static str);

        let data = vec![Entry::new("あ", Opaque("a")), Entry::new("い", Opaque("i"))];
        let sections = partition(&data);
        assert_eq!(sections[0].entries[1].attributes, Opaque("i"));
    }
}

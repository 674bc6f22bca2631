/// One page of a listing. Entry numbers are 1-based and continue across
/// pages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    pub index: usize,
    pub count: usize,
    pub entries: Vec<(usize, String)>,
}

impl Page {
    pub fn is_first(&self) -> bool {
        self.index == 0
    }

    pub fn is_last(&self) -> bool {
        self.index + 1 >= self.count
    }

    pub fn footer(&self) -> String {
        format!("Page {}/{}", self.index + 1, self.count)
    }

    pub fn lines(&self) -> Vec<String> {
        self.entries
            .iter()
            .map(|(n, text)| format!("{n}. {text}"))
            .collect()
    }
}

#[derive(Debug, Clone)]
pub struct Pages {
    entries: Vec<String>,
    page_size: usize,
}

impl Pages {
    pub fn new(entries: Vec<String>, page_size: usize) -> Self {
        Self {
            entries,
            page_size: page_size.max(1),
        }
    }

    /// Number of pages; an empty listing still has one (empty) page.
    pub fn count(&self) -> usize {
        self.entries.len().div_ceil(self.page_size).max(1)
    }

    /// The page at `index`, clamped to the last page.
    pub fn page(&self, index: usize) -> Page {
        let index = index.min(self.count() - 1);
        let start = index * self.page_size;
        let end = (start + self.page_size).min(self.entries.len());

        Page {
            index,
            count: self.count(),
            entries: self.entries[start..end]
                .iter()
                .enumerate()
                .map(|(i, e)| (start + i + 1, e.clone()))
                .collect(),
        }
    }
}

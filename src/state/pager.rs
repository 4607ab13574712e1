/// Gallery filtering and pagination
///
/// The pager owns the catalog shown on the projects tab together with the
/// active filter and page. Filtering always restarts from the first page.

use super::catalog::Catalog;
use super::category::{classify, Category};
use super::data::ProjectEntry;

/// Default number of project cards per page
pub const DEFAULT_PAGE_SIZE: usize = 6;

/// Active category filter. `All` is the sentinel that disables filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Filter {
    #[default]
    All,
    Only(Category),
}

impl Filter {
    pub fn matches(self, project: &ProjectEntry) -> bool {
        match self {
            Filter::All => true,
            Filter::Only(category) => classify(&project.folder) == category,
        }
    }
}

/// Slide direction of the last transition. Only used for animation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction {
    Backward,
    #[default]
    None,
    Forward,
}

impl Direction {
    pub fn as_sign(self) -> i8 {
        match self {
            Direction::Backward => -1,
            Direction::None => 0,
            Direction::Forward => 1,
        }
    }
}

#[derive(Debug, Clone)]
pub struct GalleryPager {
    catalog: Catalog,
    filter: Filter,
    current_page: usize,
    direction: Direction,
    page_size: usize,
}

impl GalleryPager {
    /// Create a pager on the first page with no filter.
    /// A page size of zero is clamped to one.
    pub fn new(catalog: Catalog, page_size: usize) -> Self {
        Self {
            catalog,
            filter: Filter::All,
            current_page: 0,
            direction: Direction::None,
            page_size: page_size.max(1),
        }
    }

    /// Swap in a freshly loaded catalog, keeping the filter
    pub fn replace_catalog(&mut self, catalog: Catalog) {
        self.catalog = catalog;
        self.current_page = 0;
        self.direction = Direction::None;
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn filter(&self) -> Filter {
        self.filter
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Replace the filter. The page always resets to 0.
    pub fn set_filter(&mut self, filter: Filter) {
        self.filter = filter;
        self.current_page = 0;
        self.direction = Direction::None;
    }

    /// Projects matching the active filter, in catalog order
    pub fn filtered_projects(&self) -> Vec<&ProjectEntry> {
        self.catalog
            .projects()
            .iter()
            .filter(|project| self.filter.matches(project))
            .collect()
    }

    /// Number of pages; zero when nothing matches the filter
    pub fn total_pages(&self) -> usize {
        self.filtered_projects().len().div_ceil(self.page_size)
    }

    /// Projects on the current page, clipped to what is available
    pub fn current_page_items(&self) -> Vec<&ProjectEntry> {
        self.filtered_projects()
            .into_iter()
            .skip(self.current_page * self.page_size)
            .take(self.page_size)
            .collect()
    }

    /// Move to `index` if it is a valid page. Out-of-range requests are
    /// ignored. Returns whether the page changed.
    pub fn go_to_page(&mut self, index: usize, direction: Direction) -> bool {
        if index >= self.total_pages() {
            return false;
        }

        self.current_page = index;
        self.direction = direction;
        true
    }

    pub fn has_previous_page(&self) -> bool {
        self.current_page > 0
    }

    pub fn has_next_page(&self) -> bool {
        self.current_page + 1 < self.total_pages()
    }

    pub fn next_page(&mut self) -> bool {
        self.go_to_page(self.current_page + 1, Direction::Forward)
    }

    pub fn previous_page(&mut self) -> bool {
        match self.current_page.checked_sub(1) {
            Some(index) => self.go_to_page(index, Direction::Backward),
            None => false,
        }
    }
}

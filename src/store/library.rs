// Ordered, duplicate-free list of book titles behind a read/write lock.

use parking_lot::RwLock;
use tracing::debug;

use crate::error::LibraryError;

#[derive(Debug, Default)]
pub struct Library {
    titles: RwLock<Vec<String>>,
}

impl Library {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a library from existing titles, in order.
    ///
    /// Fails on the first empty or repeated title.
    pub fn from_titles<I, S>(titles: I) -> Result<Self, LibraryError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let library = Self::new();
        for title in titles {
            library.add(title)?;
        }
        Ok(library)
    }

    /// Append a title to the end of the library.
    pub fn add(&self, title: impl Into<String>) -> Result<(), LibraryError> {
        let title = title.into();
        if title.is_empty() {
            return Err(LibraryError::title_required());
        }

        let mut titles = self.titles.write();
        if titles.contains(&title) {
            return Err(LibraryError::already_exists());
        }
        debug!("library add {:?} at position {}", title, titles.len());
        titles.push(title);
        Ok(())
    }

    /// Remove a title, shifting later titles forward.
    pub fn remove(&self, title: &str) -> Result<(), LibraryError> {
        let mut titles = self.titles.write();
        let index = titles
            .iter()
            .position(|t| t == title)
            .ok_or_else(LibraryError::not_found)?;
        titles.remove(index);
        debug!("library remove {:?} from position {}", title, index);
        Ok(())
    }

    /// Replace `old` with `new` at the same position.
    pub fn rename(&self, old: &str, new: impl Into<String>) -> Result<(), LibraryError> {
        let new = new.into();
        let mut titles = self.titles.write();
        let index = titles
            .iter()
            .position(|t| t == old)
            .ok_or_else(LibraryError::not_found)?;
        if new.is_empty() {
            return Err(LibraryError::title_required());
        }
        if titles.contains(&new) {
            return Err(LibraryError::new_name_exists());
        }
        debug!("library rename {:?} -> {:?} at position {}", old, new, index);
        titles[index] = new;
        Ok(())
    }

    /// Copy of the current titles in library order.
    pub fn snapshot(&self) -> Vec<String> {
        self.titles.read().clone()
    }

    pub fn contains(&self, title: &str) -> bool {
        self.titles.read().iter().any(|t| t == title)
    }

    pub fn len(&self) -> usize {
        self.titles.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.titles.read().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn three_books() -> Library {
        Library::from_titles(["Book 1", "Book 2", "Book 3"]).unwrap()
    }

    #[test]
    fn test_add_appends_in_order() {
        let library = Library::new();
        library.add("X").unwrap();
        library.add("Y").unwrap();
        assert_eq!(library.snapshot(), vec!["X", "Y"]);
    }

    #[test]
    fn test_add_duplicate_rejected() {
        let library = Library::new();
        library.add("X").unwrap();
        let err = library.add("X").unwrap_err();
        assert!(matches!(err, LibraryError::Duplicate(_)));
        assert_eq!(library.len(), 1);
    }

    #[test]
    fn test_add_empty_rejected() {
        let library = Library::new();
        assert!(matches!(
            library.add("").unwrap_err(),
            LibraryError::Validation(_)
        ));
        assert!(library.is_empty());
    }

    #[test]
    fn test_remove_missing_leaves_library_unchanged() {
        let library = three_books();
        assert!(matches!(
            library.remove("Nonexistent Book").unwrap_err(),
            LibraryError::NotFound(_)
        ));
        assert_eq!(library.snapshot(), vec!["Book 1", "Book 2", "Book 3"]);
    }

    #[test]
    fn test_remove_keeps_order_of_rest() {
        let library = three_books();
        library.remove("Book 2").unwrap();
        assert_eq!(library.snapshot(), vec!["Book 1", "Book 3"]);
        assert!(!library.contains("Book 2"));
    }

    #[test]
    fn test_rename_preserves_position() {
        let library = three_books();
        library.rename("Book 2", "Middle").unwrap();
        assert_eq!(library.snapshot(), vec!["Book 1", "Middle", "Book 3"]);
    }

    #[test]
    fn test_rename_to_existing_rejected() {
        let library = three_books();
        assert!(matches!(
            library.rename("Book 1", "Book 2").unwrap_err(),
            LibraryError::Duplicate(_)
        ));
        assert_eq!(library.snapshot(), vec!["Book 1", "Book 2", "Book 3"]);
    }

    #[test]
    fn test_rename_missing_rejected() {
        let library = three_books();
        assert!(matches!(
            library.rename("Nope", "Updated Book").unwrap_err(),
            LibraryError::NotFound(_)
        ));
    }

    #[test]
    fn test_from_titles_rejects_duplicates() {
        assert!(Library::from_titles(["A", "B", "A"]).is_err());
    }
}

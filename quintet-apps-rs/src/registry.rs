//! The compiled-in table of app descriptors.

use crate::app::App;
use crate::error::AppError;

/// Ordered, immutable collection of the firmware's apps.
///
/// The set is fixed at build time; construction only validates it. Entry
/// order is stable and drives index-based selection UIs. Lookups are
/// linear; none of them belong on the interrupt path.
pub struct AppRegistry<E: 'static = ()> {
    apps: &'static [&'static dyn App<E>],
}

impl<E> Clone for AppRegistry<E> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<E> Copy for AppRegistry<E> {}

impl<E> AppRegistry<E> {
    /// Wrap the compiled-in descriptor slice.
    ///
    /// Rejects the table outright when two entries share an id; ids must
    /// be unique for the lifetime of the firmware image.
    pub fn new(apps: &'static [&'static dyn App<E>]) -> Result<Self, AppError> {
        for (i, app) in apps.iter().enumerate() {
            for other in &apps[i + 1..] {
                if app.id() == other.id() {
                    return Err(AppError::DuplicateAppId(app.id()));
                }
            }
        }
        Ok(Self { apps })
    }

    /// Look up an app and its index by id.
    pub fn entry(&self, id: u16) -> Option<(usize, &'static dyn App<E>)> {
        self.apps
            .iter()
            .enumerate()
            .find(|(_, app)| app.id() == id)
            .map(|(index, &app)| (index, app))
    }

    /// Look up an app by id; `None` when absent.
    pub fn find(&self, id: u16) -> Option<&'static dyn App<E>> {
        self.entry(id).map(|(_, app)| app)
    }

    /// Position of an app in the table; `None` when absent.
    pub fn index_of(&self, id: u16) -> Option<usize> {
        self.entry(id).map(|(index, _)| index)
    }

    /// App at a table position.
    pub fn get(&self, index: usize) -> Option<&'static dyn App<E>> {
        self.apps.get(index).copied()
    }

    pub fn len(&self) -> usize {
        self.apps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.apps.is_empty()
    }

    /// Iterate the descriptors in table order, for selection UIs.
    pub fn iter(&self) -> impl Iterator<Item = &'static dyn App<E>> + '_ {
        self.apps.iter().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Stub {
        id: u16,
        name: &'static str,
    }

    impl App for Stub {
        fn id(&self) -> u16 {
            self.id
        }
        fn name(&self) -> &'static str {
            self.name
        }
    }

    static ALPHA: Stub = Stub {
        id: 1,
        name: "alpha",
    };
    static BETA: Stub = Stub {
        id: 7,
        name: "beta",
    };
    static GAMMA: Stub = Stub {
        id: 3,
        name: "gamma",
    };
    static BETA_TWIN: Stub = Stub {
        id: 7,
        name: "beta twin",
    };

    static APPS: [&dyn App; 3] = [&ALPHA, &BETA, &GAMMA];

    #[test]
    fn find_and_index_by_id() {
        let registry = AppRegistry::new(&APPS).unwrap();
        assert_eq!(registry.find(7).unwrap().name(), "beta");
        assert_eq!(registry.index_of(7), Some(1));
        assert_eq!(registry.index_of(1), Some(0));
        assert_eq!(registry.index_of(3), Some(2));
    }

    #[test]
    fn missing_id_is_none() {
        let registry = AppRegistry::new(&APPS).unwrap();
        assert!(registry.find(99).is_none());
        assert_eq!(registry.index_of(99), None);
        assert_eq!(registry.index_of(0), None);
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        static CLASHING: [&dyn App; 3] = [&ALPHA, &BETA, &BETA_TWIN];
        assert_eq!(
            AppRegistry::new(&CLASHING).err(),
            Some(AppError::DuplicateAppId(7))
        );
    }

    #[test]
    fn table_order_is_stable() {
        let registry = AppRegistry::new(&APPS).unwrap();
        let names: [&str; 3] = [
            registry.get(0).unwrap().name(),
            registry.get(1).unwrap().name(),
            registry.get(2).unwrap().name(),
        ];
        assert_eq!(names, ["alpha", "beta", "gamma"]);
        assert_eq!(registry.len(), 3);
        assert!(!registry.is_empty());
        assert!(registry.get(3).is_none());

        let mut listed = registry.iter();
        assert_eq!(listed.next().unwrap().id(), 1);
        assert_eq!(listed.next().unwrap().id(), 7);
        assert_eq!(listed.next().unwrap().id(), 3);
        assert!(listed.next().is_none());
    }

    #[test]
    fn empty_table_is_valid() {
        static NONE: [&dyn App; 0] = [];
        let registry = AppRegistry::new(&NONE).unwrap();
        assert!(registry.is_empty());
        assert!(registry.find(1).is_none());
    }
}

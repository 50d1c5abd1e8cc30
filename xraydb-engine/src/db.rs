use std::collections::{BTreeMap, HashMap};
use std::path::Path;
use std::sync::Arc;

use xraydb_tables::{TableSet, VersionRow};

use crate::cache::KeyedCache;
use crate::chantler::ChantlerTable;
use crate::config::Config;
use crate::elam::{CrossSectionKind, ElamTable};
use crate::element::{Element, ElementId};
use crate::error::{Result, XrayDbError};
use crate::store::{MemoryStore, TableStore};
use crate::transitions::Catalog;
use crate::waasmaier::F0Coefficients;

/// The main interface to the X-ray database.
///
/// Element constants are indexed when the instance is built. Edge catalogs
/// and coefficient tables are decoded on first use and cached inside the
/// instance, so two instances over different stores never share state.
/// `XrayDb` is `Send + Sync`; share it behind an `Arc` for concurrent use.
pub struct XrayDb {
    store: Box<dyn TableStore>,
    config: Config,
    versions: Vec<VersionRow>,
    elements: BTreeMap<u16, Element>,
    symbol_to_z: HashMap<String, u16>,
    name_to_z: HashMap<String, u16>,
    pub(crate) label_aliases: HashMap<String, String>,
    pub(crate) catalogs: KeyedCache<u16, Catalog>,
    pub(crate) elam_tables: KeyedCache<(u16, CrossSectionKind), ElamTable>,
    pub(crate) chantler_tables: KeyedCache<u16, ChantlerTable>,
    pub(crate) f0_tables: KeyedCache<u16, Vec<F0Coefficients>>,
}

impl XrayDb {
    pub fn new(store: impl TableStore + 'static) -> Result<Self> {
        Self::with_config(store, Config::default())
    }

    pub fn with_config(store: impl TableStore + 'static, config: Config) -> Result<Self> {
        config.validate()?;
        let mut elements = BTreeMap::new();
        let mut symbol_to_z = HashMap::new();
        let mut name_to_z = HashMap::new();

        for row in store.elements() {
            let z = row.atomic_number;
            if symbol_to_z
                .insert(row.symbol.to_lowercase(), z)
                .is_some()
            {
                return Err(XrayDbError::DataError(format!(
                    "duplicate element symbol '{}'",
                    row.symbol
                )));
            }
            if !row.name.is_empty() {
                name_to_z.insert(row.name.to_lowercase(), z);
            }
            let element = Element {
                atomic_number: z,
                symbol: row.symbol,
                name: row.name,
                molar_mass: row.molar_mass,
                density: row.density,
            };
            if elements.insert(z, element).is_some() {
                return Err(XrayDbError::DataError(format!(
                    "duplicate atomic number {z}"
                )));
            }
        }

        let label_aliases = store
            .label_aliases()
            .into_iter()
            .map(|a| (a.alias.to_lowercase(), a.canonical))
            .collect();

        let versions = store.versions();
        log::debug!(
            "indexed {} elements, tables {}",
            elements.len(),
            versions.last().map_or("unversioned", |v| v.tag.as_str())
        );

        Ok(XrayDb {
            store: Box::new(store),
            config,
            versions,
            elements,
            symbol_to_z,
            name_to_z,
            label_aliases,
            catalogs: KeyedCache::new(),
            elam_tables: KeyedCache::new(),
            chantler_tables: KeyedCache::new(),
            f0_tables: KeyedCache::new(),
        })
    }

    /// Build over an in-memory set of tables.
    pub fn from_tables(tables: TableSet) -> Result<Self> {
        Self::new(MemoryStore::new(tables))
    }

    /// Open a compressed table blob written by [`crate::store::encode_blob`].
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        Self::new(MemoryStore::open(path)?)
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Tag of the newest table release, if the store records one.
    pub fn data_version(&self) -> Option<&str> {
        self.versions.last().map(|v| v.tag.as_str())
    }

    /// Every recorded table release, oldest first.
    pub fn versions(&self) -> &[VersionRow] {
        &self.versions
    }

    pub(crate) fn store(&self) -> &dyn TableStore {
        self.store.as_ref()
    }

    /// Number of decoded catalogs and coefficient sets held in the cache.
    pub fn cached_sets(&self) -> usize {
        self.catalogs.len()
            + self.elam_tables.len()
            + self.chantler_tables.len()
            + self.f0_tables.len()
    }

    /// Resolve an element identifier (symbol, name, or atomic number) to Z.
    pub fn resolve<'a>(&self, element: impl Into<ElementId<'a>>) -> Result<u16> {
        let id = element.into();
        let found = match id {
            ElementId::Number(z) => u16::try_from(z)
                .ok()
                .filter(|z| self.elements.contains_key(z)),
            ElementId::Symbol(s) => {
                let key = s.trim().to_lowercase();
                self.symbol_to_z
                    .get(&key)
                    .or_else(|| self.name_to_z.get(&key))
                    .copied()
            }
        };
        found.ok_or_else(|| XrayDbError::UnknownElement(id.to_string()))
    }

    pub fn element<'a>(&self, element: impl Into<ElementId<'a>>) -> Result<&Element> {
        let z = self.resolve(element)?;
        self.elements
            .get(&z)
            .ok_or_else(|| XrayDbError::UnknownElement(z.to_string()))
    }

    /// All elements in the store, ordered by atomic number.
    pub fn elements(&self) -> impl Iterator<Item = &Element> {
        self.elements.values()
    }

    pub fn atomic_number<'a>(&self, element: impl Into<ElementId<'a>>) -> Result<u16> {
        self.resolve(element)
    }

    pub fn symbol<'a>(&self, element: impl Into<ElementId<'a>>) -> Result<&str> {
        Ok(&self.element(element)?.symbol)
    }

    pub fn atomic_name<'a>(&self, element: impl Into<ElementId<'a>>) -> Result<&str> {
        Ok(&self.element(element)?.name)
    }

    pub fn molar_mass<'a>(&self, element: impl Into<ElementId<'a>>) -> Result<f64> {
        Ok(self.element(element)?.molar_mass)
    }

    pub fn density<'a>(&self, element: impl Into<ElementId<'a>>) -> Result<f64> {
        Ok(self.element(element)?.density)
    }
}

// Compile-time check that the engine can be shared across threads.
const _: fn() = || {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<XrayDb>();
    assert_send_sync::<Arc<XrayDb>>();
};

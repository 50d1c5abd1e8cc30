//! The table store the engine reads from.
//!
//! [`TableStore`] is a keyed row source: every lookup is for one element
//! (by symbol), so the engine never scans a whole table to answer a query.
//! [`MemoryStore`] is the bundled implementation, built from a [`TableSet`]
//! or from a zstd-compressed postcard blob of one.

use std::collections::HashMap;
use std::path::Path;

use xraydb_tables::{
    ChantlerRow, CoreWidthRow, CosterKronigRow, ElementRow, LabelAliasRow, PhotoabsorptionRow,
    ScatteringRow, TableSet, VersionRow, WaasmaierRow, XrayLevelRow, XrayTransitionRow,
};

use crate::error::{Result, XrayDbError};

/// Keyed read access to the reference tables.
///
/// `element` arguments are canonical element symbols as listed by
/// [`TableStore::elements`].
pub trait TableStore: Send + Sync {
    fn elements(&self) -> Vec<ElementRow>;
    fn xray_levels(&self, element: &str) -> Vec<XrayLevelRow>;
    fn xray_transitions(&self, element: &str) -> Vec<XrayTransitionRow>;
    fn coster_kronig(&self, element: &str) -> Vec<CosterKronigRow>;
    fn corelevel_widths(&self, element: &str) -> Vec<CoreWidthRow>;
    fn photoabsorption(&self, element: &str) -> Option<PhotoabsorptionRow>;
    fn scattering(&self, element: &str) -> Option<ScatteringRow>;
    fn chantler(&self, element: &str) -> Option<ChantlerRow>;
    /// Waasmaier-Kirfel rows in store order; the neutral atom comes first.
    fn waasmaier(&self, element: &str) -> Vec<WaasmaierRow>;
    fn label_aliases(&self) -> Vec<LabelAliasRow>;
    /// Release history of the tables, oldest first.
    fn versions(&self) -> Vec<VersionRow> {
        Vec::new()
    }
}

#[derive(Default)]
struct ElementRows {
    levels: Vec<usize>,
    transitions: Vec<usize>,
    coster_kronig: Vec<usize>,
    widths: Vec<usize>,
    photoabsorption: Option<usize>,
    scattering: Option<usize>,
    chantler: Option<usize>,
    waasmaier: Vec<usize>,
}

fn slot<'a>(index: &'a mut HashMap<String, ElementRows>, element: &str) -> &'a mut ElementRows {
    index.entry(element.to_string()).or_default()
}

/// A [`TableStore`] held entirely in memory, indexed by element symbol.
pub struct MemoryStore {
    tables: TableSet,
    index: HashMap<String, ElementRows>,
}

impl MemoryStore {
    pub fn new(tables: TableSet) -> Self {
        let mut index: HashMap<String, ElementRows> = HashMap::new();

        for (i, r) in tables.xray_levels.iter().enumerate() {
            slot(&mut index, &r.element).levels.push(i);
        }
        for (i, r) in tables.xray_transitions.iter().enumerate() {
            slot(&mut index, &r.element).transitions.push(i);
        }
        for (i, r) in tables.coster_kronig.iter().enumerate() {
            slot(&mut index, &r.element).coster_kronig.push(i);
        }
        for (i, r) in tables.corelevel_widths.iter().enumerate() {
            slot(&mut index, &r.element).widths.push(i);
        }
        for (i, r) in tables.photoabsorption.iter().enumerate() {
            slot(&mut index, &r.element).photoabsorption.get_or_insert(i);
        }
        for (i, r) in tables.scattering.iter().enumerate() {
            slot(&mut index, &r.element).scattering.get_or_insert(i);
        }
        for (i, r) in tables.chantler.iter().enumerate() {
            slot(&mut index, &r.element).chantler.get_or_insert(i);
        }
        for (i, r) in tables.waasmaier.iter().enumerate() {
            slot(&mut index, &r.element).waasmaier.push(i);
        }

        MemoryStore { tables, index }
    }

    /// Decode a blob written by [`encode_blob`].
    pub fn from_blob(bytes: &[u8]) -> Result<Self> {
        let mut decoder = ruzstd::decoding::StreamingDecoder::new(bytes)
            .map_err(|e| XrayDbError::DataError(format!("not a zstd stream: {e}")))?;
        let mut decompressed = Vec::new();
        std::io::Read::read_to_end(&mut decoder, &mut decompressed)
            .map_err(|e| XrayDbError::DataError(format!("failed to decompress tables: {e}")))?;

        let tables: TableSet = postcard::from_bytes(&decompressed)
            .map_err(|e| XrayDbError::DataError(format!("failed to deserialize tables: {e}")))?;

        log::info!(
            "loaded table store: {} elements, {} levels, {} transitions, {} chantler, {} waasmaier",
            tables.elements.len(),
            tables.xray_levels.len(),
            tables.xray_transitions.len(),
            tables.chantler.len(),
            tables.waasmaier.len(),
        );
        Ok(Self::new(tables))
    }

    /// Read and decode a blob file.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        log::info!("opening table store {}", path.display());
        let bytes = std::fs::read(path)?;
        Self::from_blob(&bytes)
    }

    pub fn tables(&self) -> &TableSet {
        &self.tables
    }

    fn rows(&self, element: &str) -> Option<&ElementRows> {
        self.index.get(element)
    }

    fn pick<T: Clone>(
        &self,
        table: &[T],
        which: impl Fn(&ElementRows) -> &Vec<usize>,
        element: &str,
    ) -> Vec<T> {
        self.rows(element)
            .map(|r| which(r).iter().map(|&i| table[i].clone()).collect())
            .unwrap_or_default()
    }
}

impl From<TableSet> for MemoryStore {
    fn from(tables: TableSet) -> Self {
        Self::new(tables)
    }
}

impl TableStore for MemoryStore {
    fn elements(&self) -> Vec<ElementRow> {
        self.tables.elements.clone()
    }

    fn xray_levels(&self, element: &str) -> Vec<XrayLevelRow> {
        self.pick(&self.tables.xray_levels, |r| &r.levels, element)
    }

    fn xray_transitions(&self, element: &str) -> Vec<XrayTransitionRow> {
        self.pick(&self.tables.xray_transitions, |r| &r.transitions, element)
    }

    fn coster_kronig(&self, element: &str) -> Vec<CosterKronigRow> {
        self.pick(&self.tables.coster_kronig, |r| &r.coster_kronig, element)
    }

    fn corelevel_widths(&self, element: &str) -> Vec<CoreWidthRow> {
        self.pick(&self.tables.corelevel_widths, |r| &r.widths, element)
    }

    fn photoabsorption(&self, element: &str) -> Option<PhotoabsorptionRow> {
        let i = self.rows(element)?.photoabsorption?;
        Some(self.tables.photoabsorption[i].clone())
    }

    fn scattering(&self, element: &str) -> Option<ScatteringRow> {
        let i = self.rows(element)?.scattering?;
        Some(self.tables.scattering[i].clone())
    }

    fn chantler(&self, element: &str) -> Option<ChantlerRow> {
        let i = self.rows(element)?.chantler?;
        Some(self.tables.chantler[i].clone())
    }

    fn waasmaier(&self, element: &str) -> Vec<WaasmaierRow> {
        self.pick(&self.tables.waasmaier, |r| &r.waasmaier, element)
    }

    fn label_aliases(&self) -> Vec<LabelAliasRow> {
        self.tables.label_aliases.clone()
    }

    fn versions(&self) -> Vec<VersionRow> {
        self.tables.version.clone()
    }
}

/// Serialize with postcard and compress with zstd, the format read by
/// [`MemoryStore::from_blob`].
pub fn encode_blob(tables: &TableSet) -> Result<Vec<u8>> {
    let serialized = postcard::to_allocvec(tables)
        .map_err(|e| XrayDbError::DataError(format!("failed to serialize tables: {e}")))?;
    Ok(ruzstd::encoding::compress_to_vec(
        serialized.as_slice(),
        ruzstd::encoding::CompressionLevel::Fastest,
    ))
}

//! Presentation order: contiguous per-model blocks, newest run first.

use crate::core::Record;
use std::borrow::Cow;

/// Records grouped by `model_id` (ascending) with each group newest first.
///
/// This is the only way to obtain [`ModelBlock`]s, so anything that compares
/// a model's runs is guaranteed a grouped sequence.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OrderedRecords {
    records: Vec<Record>,
}

impl OrderedRecords {
    /// Stable sort by date descending, then stable sort by model id. The
    /// second pass keeps the date order inside each model group.
    pub fn from_records(mut records: Vec<Record>) -> Self {
        records.sort_by(|a, b| b.date().cmp(&a.date()));
        records.sort_by(|a, b| a.model_id().cmp(&b.model_id()));
        Self { records }
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// Field edits only; the slice cannot be reordered through this.
    pub(crate) fn records_mut(&mut self) -> &mut [Record] {
        &mut self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Record> {
        self.records.iter()
    }

    pub fn blocks(&self) -> ModelBlocks<'_> {
        ModelBlocks {
            records: &self.records,
            offset: 0,
        }
    }
}

/// One model's runs, newest first.
#[derive(Debug, Clone, Copy)]
pub struct ModelBlock<'a> {
    start: usize,
    records: &'a [Record],
}

impl<'a> ModelBlock<'a> {
    pub fn model_id(&self) -> Cow<'a, str> {
        self.records[0].model_id()
    }

    /// Position of the newest run within the ordered records.
    pub fn start(&self) -> usize {
        self.start
    }

    pub fn newest(&self) -> &'a Record {
        &self.records[0]
    }

    pub fn previous(&self) -> Option<&'a Record> {
        self.records.get(1)
    }

    pub fn records(&self) -> &'a [Record] {
        self.records
    }
}

pub struct ModelBlocks<'a> {
    records: &'a [Record],
    offset: usize,
}

impl<'a> Iterator for ModelBlocks<'a> {
    type Item = ModelBlock<'a>;

    fn next(&mut self) -> Option<ModelBlock<'a>> {
        let rest = self.records.get(self.offset..).filter(|r| !r.is_empty())?;
        let key = rest[0].model_id();
        let len = rest.iter().take_while(|r| r.model_id() == key).count();

        let block = ModelBlock {
            start: self.offset,
            records: &rest[..len],
        };
        self.offset += len;
        Some(block)
    }
}

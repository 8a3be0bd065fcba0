use std::collections::BTreeMap;

use crate::exe_image::MachineCode;

/// Default threshold for [`CodeAnalyzer::find_strings`].
pub const MIN_STRING_LENGTH: usize = 4;

const ASCII_PRINTABLE_MIN: u8 = 0x20;
const ASCII_PRINTABLE_MAX: u8 = 0x7E;

/// Byte sequences worth flagging in x86/x64 machine code.
pub const KNOWN_PATTERNS: &[(&[u8], &str)] = &[
    (&[0x55, 0x8B, 0xEC], "x86 function prologue"),
    (&[0x48, 0x89, 0x5C, 0x24], "x64 function prologue"),
    (&[0xCC], "INT 3 breakpoint"),
    (&[0xC3], "RET"),
    (&[0x90], "NOP"),
];

/// Static inspection over a list of machine-code blobs.
///
/// The analyzer borrows the blobs and never mutates them. Result maps are
/// keyed by blob index into the supplied slice; `blob_index` narrows an
/// operation to a single blob, which keeps its index as the key.
pub struct CodeAnalyzer<'a> {
    machine_codes: &'a [MachineCode],
}

impl<'a> CodeAnalyzer<'a> {
    pub fn new(machine_codes: &'a [MachineCode]) -> CodeAnalyzer<'a> {
        CodeAnalyzer { machine_codes }
    }

    fn selected(&self, blob_index: Option<usize>) -> impl Iterator<Item = (usize, &'a MachineCode)> {
        let machine_codes = self.machine_codes;
        machine_codes
            .iter()
            .enumerate()
            .filter(move |(index, _)| blob_index.map_or(true, |wanted| *index == wanted))
    }

    /// All occurrences of `pattern`, as `virtual_address + offset`. Blobs
    /// without a match are omitted; an empty pattern matches nothing.
    pub fn find_patterns(
        &self,
        pattern: &[u8],
        blob_index: Option<usize>,
    ) -> BTreeMap<usize, Vec<u64>> {
        let mut results = BTreeMap::new();
        if pattern.is_empty() {
            return results;
        }

        for (index, machine_code) in self.selected(blob_index) {
            let addresses: Vec<u64> = machine_code
                .code
                .windows(pattern.len())
                .enumerate()
                .filter(|(_, window)| *window == pattern)
                .map(|(offset, _)| u64::from(machine_code.virtual_address) + offset as u64)
                .collect();
            if !addresses.is_empty() {
                results.insert(index, addresses);
            }
        }
        results
    }

    /// Every [`KNOWN_PATTERNS`] entry searched across all blobs, paired
    /// with its description.
    pub fn find_known_patterns(&self) -> Vec<(&'static str, BTreeMap<usize, Vec<u64>>)> {
        KNOWN_PATTERNS
            .iter()
            .map(|(pattern, description)| (*description, self.find_patterns(pattern, None)))
            .collect()
    }

    /// Per-blob byte frequencies, sorted by count descending with ties
    /// broken by byte value ascending. Every selected blob gets an entry.
    pub fn byte_statistics(&self, blob_index: Option<usize>) -> BTreeMap<usize, Vec<(u8, usize)>> {
        let mut results = BTreeMap::new();

        for (index, machine_code) in self.selected(blob_index) {
            let mut counts = [0usize; 256];
            for &byte in &machine_code.code {
                counts[usize::from(byte)] += 1;
            }

            let mut statistics: Vec<(u8, usize)> = counts
                .iter()
                .enumerate()
                .filter(|(_, &count)| count > 0)
                .map(|(byte, &count)| (byte as u8, count))
                .collect();
            statistics.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));

            results.insert(index, statistics);
        }
        results
    }

    /// Maximal runs of printable ASCII (`0x20..=0x7E`) of at least
    /// `min_length` bytes, as `(virtual_address + run_start, text)`. A run
    /// reaching the end of a blob counts. Blobs without strings are
    /// omitted.
    pub fn find_strings(
        &self,
        min_length: usize,
        blob_index: Option<usize>,
    ) -> BTreeMap<usize, Vec<(u64, String)>> {
        let mut results = BTreeMap::new();

        for (index, machine_code) in self.selected(blob_index) {
            let mut strings = Vec::new();
            let mut run_start: Option<usize> = None;

            for (offset, &byte) in machine_code.code.iter().enumerate() {
                if (ASCII_PRINTABLE_MIN..=ASCII_PRINTABLE_MAX).contains(&byte) {
                    run_start.get_or_insert(offset);
                } else {
                    Self::flush_run(machine_code, run_start.take(), offset, min_length, &mut strings);
                }
            }
            Self::flush_run(
                machine_code,
                run_start.take(),
                machine_code.code.len(),
                min_length,
                &mut strings,
            );

            if !strings.is_empty() {
                results.insert(index, strings);
            }
        }
        results
    }

    fn flush_run(
        machine_code: &MachineCode,
        run_start: Option<usize>,
        end: usize,
        min_length: usize,
        strings: &mut Vec<(u64, String)>,
    ) {
        let Some(start) = run_start else {
            return;
        };
        if end - start < min_length {
            return;
        }
        let text = String::from_utf8_lossy(&machine_code.code[start..end]).into_owned();
        strings.push((u64::from(machine_code.virtual_address) + start as u64, text));
    }
}

//! String interning for symbols.
//!
//! Training and encoding compare symbols by their literal string value. Each
//! distinct string gets one dense id here, so pair comparisons reduce to
//! integer comparisons while keeping string semantics.

use std::collections::HashMap;

/// An ordered pair of interned symbol ids.
pub(crate) type Pair = (u32, u32);

#[derive(Debug, Clone, Default)]
pub(crate) struct SymbolTable {
    strings: Vec<String>,
    ids: HashMap<String, u32>,
}

impl SymbolTable {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Return the id of `symbol`, assigning the next free one if needed.
    pub(crate) fn intern(&mut self, symbol: &str) -> u32 {
        if let Some(&id) = self.ids.get(symbol) {
            return id;
        }
        let id = self.strings.len() as u32;
        self.strings.push(symbol.to_string());
        self.ids.insert(symbol.to_string(), id);
        id
    }

    pub(crate) fn intern_char(&mut self, c: char) -> u32 {
        let mut buf = [0u8; 4];
        self.intern(c.encode_utf8(&mut buf))
    }

    pub(crate) fn get(&self, symbol: &str) -> Option<u32> {
        self.ids.get(symbol).copied()
    }

    pub(crate) fn get_char(&self, c: char) -> Option<u32> {
        let mut buf = [0u8; 4];
        self.get(c.encode_utf8(&mut buf))
    }

    pub(crate) fn resolve(&self, id: u32) -> &str {
        &self.strings[id as usize]
    }

    pub(crate) fn len(&self) -> usize {
        self.strings.len()
    }
}

//! Global string interning.
//!
//! Module names and identifiers are compared constantly during symbol
//! lookup (`ProgramEnvironment::find_symbol` walks import chains name by
//! name). Interning them into a `Symbol` newtype turns those comparisons
//! into cheap integer equality and keeps AST/symbol-table nodes from each
//! owning their own copy of the same lexeme.

use std::cell::RefCell;
use std::fmt;

use rustc_hash::FxHashMap;

/// An interned string. Cheap to copy, compare, and hash.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Symbol(u32);

impl Symbol {
    pub fn intern(text: &str) -> Symbol {
        STRING_TABLE.with(|table| table.borrow_mut().intern(text))
    }

    pub fn as_str(self) -> &'static str {
        STRING_TABLE.with(|table| table.borrow().resolve(self))
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Default)]
struct Interner {
    names: FxHashMap<&'static str, Symbol>,
    strings: Vec<&'static str>,
}

impl Interner {
    fn intern(&mut self, text: &str) -> Symbol {
        if let Some(&sym) = self.names.get(text) {
            return sym;
        }

        // Leaked once per unique string and never freed; the interner
        // lives for the life of the thread.
        let leaked: &'static str = Box::leak(text.to_owned().into_boxed_str());

        let id = self.strings.len() as u32;
        self.strings.push(leaked);
        self.names.insert(leaked, Symbol(id));
        Symbol(id)
    }

    fn resolve(&self, sym: Symbol) -> &'static str {
        self.strings[sym.0 as usize]
    }
}

thread_local! {
    static STRING_TABLE: RefCell<Interner> = RefCell::new(Interner::default());
}

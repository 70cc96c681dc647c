//! Symbols, symbol tables, and the lexical scope stack.
//!
//! Tables are keyed by lexeme content and preserve insertion order, so a
//! later pass that walks struct fields or globals sees them in source
//! order. Lookup misses return `None`; there is no sentinel symbol.

use std::hash::BuildHasherDefault;

use indexmap::map::Entry;
use indexmap::IndexMap;
use lodec_lex::Token;
use rustc_hash::FxHasher;

use crate::annotation::Annotation;

type FxIndexMap<K, V> = IndexMap<K, V, BuildHasherDefault<FxHasher>>;

/// Where a symbol stands in its lifecycle.
///
/// ```text
/// (absent) --declare--> Declared --define--> Defined
///              |                                ^
///              +--------- FnParam --------------+  (at parameter binding)
///              |
///              +--- Uninitialized (function seen, no body yet)
/// ```
///
/// The `Defined -> Declared` transition is forbidden;
/// [`SymbolTable::insert`] refuses the downgrade.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DeclState {
    None,
    Declared,
    Defined,
    Uninitialized,
    FnParam,
}

/// A named entity: variable, function, struct, enum, or enum member.
#[derive(Clone, Debug)]
pub struct Symbol<'src> {
    /// The first declaring token; preserved across updates.
    pub token: Token<'src>,
    /// Declared type information.
    pub annotation: Annotation,
    /// Lifecycle state.
    pub state: DeclState,
    /// Ordered parameter list; populated for functions only.
    pub params: Vec<Symbol<'src>>,
    /// Field table for structs, parameter-and-locals table for
    /// functions.
    pub nested: Option<Box<SymbolTable<'src>>>,
}

impl<'src> Symbol<'src> {
    /// Creates a symbol, stamping `declared_on_line` from the token.
    pub fn new(token: Token<'src>, annotation: Annotation, state: DeclState) -> Self {
        let mut annotation = annotation;
        annotation.declared_on_line = token.line;
        Self {
            token,
            annotation,
            state,
            params: Vec::new(),
            nested: None,
        }
    }

    /// The symbol's name, i.e. its declaring lexeme.
    pub fn name(&self) -> &'src str {
        self.token.lexeme
    }
}

/// Insertion-ordered mapping from identifier lexeme to [`Symbol`].
#[derive(Clone, Debug, Default)]
pub struct SymbolTable<'src> {
    symbols: FxIndexMap<&'src str, Symbol<'src>>,
}

impl<'src> SymbolTable<'src> {
    pub fn new() -> Self {
        Self::default()
    }

    /// True if `name` is declared in this table.
    pub fn contains(&self, name: &str) -> bool {
        self.symbols.contains_key(name)
    }

    /// Looks up `name`; `None` on a miss.
    pub fn get(&self, name: &str) -> Option<&Symbol<'src>> {
        self.symbols.get(name)
    }

    /// Adds or updates a symbol and returns the stored copy.
    ///
    /// Updating preserves the first declaring token (and thus the
    /// declared line) and never downgrades a `Defined` symbol back to
    /// `Declared`.
    pub fn insert(&mut self, symbol: Symbol<'src>) -> Symbol<'src> {
        match self.symbols.entry(symbol.token.lexeme) {
            Entry::Occupied(mut entry) => {
                let existing = entry.get_mut();
                let mut incoming = symbol;
                incoming.token = existing.token;
                incoming.annotation.declared_on_line = existing.annotation.declared_on_line;
                if existing.state == DeclState::Defined && incoming.state == DeclState::Declared {
                    incoming.state = DeclState::Defined;
                }
                *existing = incoming;
                existing.clone()
            },
            Entry::Vacant(entry) => entry.insert(symbol).clone(),
        }
    }

    /// Appends `param` to the parameter list of the function named
    /// `fn_name`, replacing a previous parameter of the same name.
    pub fn register_fn_param(&mut self, fn_name: &str, param: Symbol<'src>) {
        if let Some(symbol) = self.symbols.get_mut(fn_name) {
            match symbol
                .params
                .iter_mut()
                .find(|p| p.token.lexeme == param.token.lexeme)
            {
                Some(existing) => *existing = param,
                None => symbol.params.push(param),
            }
        }
    }

    /// Symbols in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Symbol<'src>> {
        self.symbols.values()
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }
}

/// The lexical scope stack: an unbounded stack of symbol tables with the
/// module-global table at depth 0.
#[derive(Debug)]
pub struct Scope<'src> {
    tables: Vec<SymbolTable<'src>>,
}

impl<'src> Scope<'src> {
    /// A scope stack holding only the global table.
    pub fn new() -> Self {
        Self {
            tables: vec![SymbolTable::new()],
        }
    }

    /// Current depth; 0 is the module-global scope.
    pub fn depth(&self) -> usize {
        self.tables.len() - 1
    }

    /// Pushes a fresh table.
    pub fn begin(&mut self) {
        self.tables.push(SymbolTable::new());
    }

    /// Pops and releases the innermost table. The global table is never
    /// popped.
    pub fn end(&mut self) {
        if self.tables.len() > 1 {
            self.tables.pop();
        }
    }

    /// The innermost table.
    pub fn current(&self) -> &SymbolTable<'src> {
        &self.tables[self.tables.len() - 1]
    }

    /// The innermost table, mutably.
    pub fn current_mut(&mut self) -> &mut SymbolTable<'src> {
        let last = self.tables.len() - 1;
        &mut self.tables[last]
    }

    /// The module-global table.
    pub fn globals(&self) -> &SymbolTable<'src> {
        &self.tables[0]
    }

    /// Consumes the scope and hands the global table to the caller.
    pub fn into_globals(mut self) -> SymbolTable<'src> {
        self.tables.truncate(1);
        self.tables.remove(0)
    }

    /// Searches enclosing scopes for `name`, innermost first.
    ///
    /// With `include_current` the walk starts at the innermost table
    /// (used while a nested struct or function table shadows it);
    /// otherwise it starts one level out.
    pub fn find_outer(&self, name: &str, include_current: bool) -> Option<&Symbol<'src>> {
        let top = if include_current {
            self.tables.len()
        } else {
            self.tables.len() - 1
        };
        self.tables[..top].iter().rev().find_map(|t| t.get(name))
    }
}

impl<'src> Default for Scope<'src> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lodec_lex::TokenKind;

    fn token(lexeme: &str, line: u32) -> Token<'_> {
        Token {
            kind: TokenKind::Identifier,
            lexeme,
            line,
            file: None,
        }
    }

    fn declared<'src>(lexeme: &'src str, line: u32) -> Symbol<'src> {
        Symbol::new(
            token(lexeme, line),
            Annotation::from_token_kind(TokenKind::I32),
            DeclState::Declared,
        )
    }

    #[test]
    fn test_insert_and_get() {
        let mut table = SymbolTable::new();
        assert!(!table.contains("x"));
        assert!(table.get("x").is_none());

        table.insert(declared("x", 1));
        assert!(table.contains("x"));
        let sym = table.get("x").expect("x was inserted");
        assert_eq!(sym.name(), "x");
        assert_eq!(sym.state, DeclState::Declared);
    }

    #[test]
    fn test_declared_line_stamped_from_token() {
        let sym = declared("x", 42);
        assert_eq!(sym.annotation.declared_on_line, 42);
    }

    #[test]
    fn test_update_preserves_declaring_token() {
        let mut table = SymbolTable::new();
        table.insert(declared("x", 1));

        // Re-adding from a later use site keeps the original line.
        let update = Symbol::new(
            token("x", 9),
            Annotation::from_token_kind(TokenKind::I32),
            DeclState::Defined,
        );
        let stored = table.insert(update);
        assert_eq!(stored.state, DeclState::Defined);
        assert_eq!(stored.token.line, 1);
        assert_eq!(stored.annotation.declared_on_line, 1);
    }

    #[test]
    fn test_defined_never_downgrades() {
        let mut table = SymbolTable::new();
        let mut sym = declared("f", 1);
        sym.state = DeclState::Defined;
        table.insert(sym);

        let stored = table.insert(declared("f", 2));
        assert_eq!(stored.state, DeclState::Defined);
    }

    #[test]
    fn test_insertion_order_preserved() {
        let mut table = SymbolTable::new();
        for name in ["first", "second", "third"] {
            table.insert(declared(name, 1));
        }
        let names: Vec<_> = table.iter().map(|s| s.name()).collect();
        assert_eq!(names, vec!["first", "second", "third"]);
    }

    #[test]
    fn test_key_matches_lexeme() {
        let mut table = SymbolTable::new();
        table.insert(declared("velocity", 3));
        let sym = table.get("velocity").expect("inserted");
        assert_eq!(sym.token.lexeme, "velocity");
    }

    #[test]
    fn test_register_fn_param() {
        let mut table = SymbolTable::new();
        table.insert(declared("f", 1));

        let p1 = Symbol::new(
            token("a", 1),
            Annotation::from_token_kind(TokenKind::I32),
            DeclState::FnParam,
        );
        let p2 = Symbol::new(
            token("b", 1),
            Annotation::from_token_kind(TokenKind::Bool),
            DeclState::FnParam,
        );
        table.register_fn_param("f", p1.clone());
        table.register_fn_param("f", p2);
        // Re-registering a parameter replaces it in place.
        table.register_fn_param("f", p1);

        let f = table.get("f").expect("inserted");
        let names: Vec<_> = f.params.iter().map(|p| p.name()).collect();
        assert_eq!(names, vec!["a", "b"]);
    }

    #[test]
    fn test_scope_depth_and_lookup() {
        let mut scope = Scope::new();
        assert_eq!(scope.depth(), 0);

        scope.current_mut().insert(declared("global", 1));
        scope.begin();
        assert_eq!(scope.depth(), 1);
        scope.current_mut().insert(declared("local", 2));

        // Outer lookup skips the current table.
        assert!(scope.find_outer("global", false).is_some());
        assert!(scope.find_outer("local", false).is_none());
        // With the current table included, both resolve.
        assert!(scope.find_outer("local", true).is_some());

        scope.end();
        assert_eq!(scope.depth(), 0);
    }

    #[test]
    fn test_global_table_never_popped() {
        let mut scope = Scope::new();
        scope.current_mut().insert(declared("kept", 1));
        scope.end();
        assert_eq!(scope.depth(), 0);
        assert!(scope.globals().contains("kept"));
    }
}

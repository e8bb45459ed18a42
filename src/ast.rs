// JavaScript AST at the linker boundary
//
//  Copyright (C) 2022-2026 Fraglink Developers
//
//  This file is part of fraglink.
//
//  This program is free software: you can redistribute it and/or modify
//  it under the terms of the GNU General Public License as published by
//  the Free Software Foundation, either version 3 of the License, or
//  (at your option) any later version.
//
//  This program is distributed in the hope that it will be useful,
//  but WITHOUT ANY WARRANTY; without even the implied warranty of
//  MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
//  GNU General Public License for more details.
//
//  You should have received a copy of the GNU General Public License
//  along with this program.  If not, see <http://www.gnu.org/licenses/>.

//! Statement and expression values at the linker boundary.
//!
//! The linker concatenates or drops statements wholesale;
//!   it never inspects or rewrites their internals.
//! The variant family here is therefore deliberately closed and small:
//!   enough structure for the front end to describe import bindings
//!     (which the linker must compare structurally)
//!   and for everything else to be carried as opaque interned text,
//!     in the same way the object-code fragments of a conventional
//!     linker are opaque relocatable text.
//!
//! Name Spaces
//! ===========
//! Two distinct name spaces flow through fragments:
//!
//!   - [`FqName`]---a fully qualified name,
//!       unique program-wide,
//!       assigned by the out-of-scope scoping/name-resolution
//!       collaborator
//!         (classes, imports, underlying declarations); and
//!   - [`LocalName`]---a name introduced into the top-level scope of the
//!       linked output module.
//!
//! Both are interned [`SymbolId`]s;
//!   the aliases exist to document intent at API boundaries.

use crate::sym::SymbolId;

/// A fully qualified name.
///
/// Qualified names are assigned upstream by the name-resolution
///   collaborator and are unique program-wide;
///     the linker trusts that identical qualified names represent a
///     single authoritative declaration.
pub type FqName = SymbolId;

/// A name in the top-level scope of the linked output module.
pub type LocalName = SymbolId;

/// An expression that must be evaluated to obtain a value locally.
///
/// Expressions appear on the linker boundary only as import bindings,
///   where the linker must decide whether two fragments bound the same
///   imported name to the same thing.
/// That decision is _structural_:
///   two bindings conflict iff their expressions differ structurally,
///     which is precisely derived [`PartialEq`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expression {
    /// Reference to a qualified name.
    Ref(FqName),

    /// Member access (`of.member`).
    Member(Box<Expression>, SymbolId),

    /// Invocation of a callee with arguments.
    Call(Box<Expression>, Vec<Expression>),

    /// Opaque expression text.
    Text(SymbolId),
}

impl Expression {
    /// Member access on this expression.
    pub fn member(self, name: SymbolId) -> Expression {
        Expression::Member(Box::new(self), name)
    }

    /// Invoke this expression as a function.
    pub fn call(self, args: Vec<Expression>) -> Expression {
        Expression::Call(Box::new(self), args)
    }
}

/// A top-level statement of a fragment block.
///
/// Statements are opaque to the linker,
///   which only ever concatenates them or drops them wholesale
///   (see [`GlobalBlock`]).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Statement {
    /// Declaration of a local variable with an initializing expression.
    VarDecl(LocalName, Expression),

    /// An expression evaluated for its side effect.
    Expr(Expression),

    /// Opaque statement text.
    Text(SymbolId),
}

/// A statement of a [`GlobalBlock`],
///   optionally attributed to the declared class that owns it.
///
/// Ownership attribution is what allows the linker to drop a
///   re-declared class's statements at class granularity without ever
///   inspecting statement internals.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockStmt {
    pub(crate) owner: Option<FqName>,
    pub(crate) stmt: Statement,
}

impl BlockStmt {
    /// The declared class this statement belongs to,
    ///   if any.
    pub fn owner(&self) -> Option<FqName> {
        self.owner
    }

    pub fn statement(&self) -> &Statement {
        &self.stmt
    }
}

/// An ordered sequence of top-level statements.
///
/// Fragments carry three of these
///   (declaration, initializer, export),
///   which execute in that fixed order at module load time.
/// Statement order within a block is significant and is never altered by
///   the linker.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct GlobalBlock {
    stmts: Vec<BlockStmt>,
}

impl GlobalBlock {
    pub fn new() -> Self {
        Self {
            ..Default::default()
        }
    }

    /// Append a statement with no owning class.
    pub fn push(&mut self, stmt: Statement) {
        self.stmts.push(BlockStmt { owner: None, stmt });
    }

    /// Append a statement owned by the declared class `owner`.
    pub fn push_owned(&mut self, owner: FqName, stmt: Statement) {
        self.stmts.push(BlockStmt {
            owner: Some(owner),
            stmt,
        });
    }

    pub(crate) fn push_entry(&mut self, entry: BlockStmt) {
        self.stmts.push(entry);
    }

    pub fn len(&self) -> usize {
        self.stmts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stmts.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<BlockStmt> {
        self.stmts.iter()
    }

    /// Iterate over statements without their ownership attribution.
    pub fn statements(&self) -> impl Iterator<Item = &Statement> {
        self.stmts.iter().map(BlockStmt::statement)
    }
}

impl IntoIterator for GlobalBlock {
    type Item = BlockStmt;
    type IntoIter = std::vec::IntoIter<BlockStmt>;

    fn into_iter(self) -> Self::IntoIter {
        self.stmts.into_iter()
    }
}

impl<'a> IntoIterator for &'a GlobalBlock {
    type Item = &'a BlockStmt;
    type IntoIter = std::slice::Iter<'a, BlockStmt>;

    fn into_iter(self) -> Self::IntoIter {
        self.stmts.iter()
    }
}

impl FromIterator<BlockStmt> for GlobalBlock {
    fn from_iter<T: IntoIterator<Item = BlockStmt>>(iter: T) -> Self {
        Self {
            stmts: iter.into_iter().collect(),
        }
    }
}

/// A reference to an external module whose initialization may have side
///   effects.
///
/// Module identity for link-time deduplication is the external name
///   alone;
///     the internal name is whatever local alias the front end chose for
///     the importing unit,
///       and the first-seen alias wins when fragments are merged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImportedModule {
    external_name: SymbolId,
    internal_name: LocalName,
}

impl ImportedModule {
    pub fn new(external_name: SymbolId, internal_name: LocalName) -> Self {
        Self {
            external_name,
            internal_name,
        }
    }

    /// Identity of the module on the module system
    ///   (e.g. its require/import path).
    pub fn external_name(&self) -> SymbolId {
        self.external_name
    }

    /// Local alias under which the module is referenced.
    pub fn internal_name(&self) -> LocalName {
        self.internal_name
    }
}

/// An association between a local name and the underlying declaration it
///   refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NameBinding {
    name: LocalName,
    target: FqName,
}

impl NameBinding {
    pub fn new(name: LocalName, target: FqName) -> Self {
        Self { name, target }
    }

    pub fn name(&self) -> LocalName {
        self.name
    }

    /// Qualified name of the underlying declaration.
    ///
    /// Two bindings for the same local name are duplicates
    ///   (rather than a link error)
    ///   iff their targets are the same qualified name.
    pub fn target(&self) -> FqName {
        self.target
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::sym::GlobalSymbolIntern;

    #[test]
    fn block_preserves_statement_order() {
        let mut block = GlobalBlock::new();

        block.push(Statement::Text("first;".intern()));
        block.push_owned("cls".intern(), Statement::Text("second;".intern()));
        block.push(Statement::Text("third;".intern()));

        let owners: Vec<_> = block.iter().map(BlockStmt::owner).collect();
        let stmts: Vec<_> = block.statements().cloned().collect();

        assert_eq!(vec![None, Some("cls".intern()), None], owners);
        assert_eq!(
            vec![
                Statement::Text("first;".intern()),
                Statement::Text("second;".intern()),
                Statement::Text("third;".intern()),
            ],
            stmts
        );
    }

    #[test]
    fn expression_structural_equality() {
        let a = Expression::Ref("pkg.Foo".intern())
            .member("bar".intern())
            .call(vec![Expression::Text("1".intern())]);
        let b = Expression::Ref("pkg.Foo".intern())
            .member("bar".intern())
            .call(vec![Expression::Text("1".intern())]);
        let c = Expression::Ref("pkg.Foo".intern()).member("baz".intern());

        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn imported_module_identity_is_external_name() {
        let a = ImportedModule::new("runtime".intern(), "$r".intern());
        let b = ImportedModule::new("runtime".intern(), "$r2".intern());

        // Full structural equality still distinguishes aliases...
        assert_ne!(a, b);

        // ...but link-time identity does not.
        assert_eq!(a.external_name(), b.external_name());
    }
}

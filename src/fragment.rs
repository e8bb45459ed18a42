// Program fragment IR
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

//! One compiled source unit's contribution to a linked output module.
//!
//! A [`Fragment`] is produced by the
//!   (out-of-scope)
//!   front end via [`FragmentBuilder`],
//!     fully populated,
//!     and thereafter treated as immutable input to the
//!     [linker](crate::link).
//! It carries:
//!
//!   - ordered external [module references](ImportedModule),
//!       whose initialization side effects must be preserved in order;
//!   - an insertion-ordered mapping of imported qualified names to the
//!       [expressions](Expression) that must be evaluated to obtain them
//!       locally;
//!   - three ordered statement blocks---declaration,
//!       initializer,
//!       export---which execute in that fixed order at module load time;
//!   - [name bindings](NameBinding) introduced into the module's
//!       top-level name space;
//!   - the set of classes the fragment declares;
//!       and
//!   - inheritance edges from each declared class to its parent class.
//!
//! An inheritance edge is a reference,
//!   not ownership:
//!     the parent may live in a different fragment,
//!     or in no fragment at all
//!       (already linked in a prior session).
//!
//! Fragments are intentionally _not_ cloneable;
//!   each represents the single authoritative result of compiling one
//!   source unit,
//!     and duplicating one is always a pipeline defect upstream.
//! This is enforced at compile time below.

use crate::ast::{
    Expression, FqName, GlobalBlock, ImportedModule, LocalName, NameBinding,
    Statement,
};
use crate::sym::SymbolId;
use fxhash::FxHashSet;
use std::fmt::{self, Display};

#[cfg(test)]
mod test;

/// A self-contained bundle of declarations,
///   initialization code,
///   exports,
///   and import requirements produced from one compiled source unit.
///
/// See the [module-level documentation](self) for more information.
#[derive(Debug, PartialEq)]
pub struct Fragment {
    pub(crate) unit_name: SymbolId,
    pub(crate) imported_modules: Vec<ImportedModule>,
    pub(crate) imports: Vec<(FqName, Expression)>,
    pub(crate) declaration_block: GlobalBlock,
    pub(crate) initializer_block: GlobalBlock,
    pub(crate) export_block: GlobalBlock,
    pub(crate) name_bindings: Vec<NameBinding>,
    pub(crate) declared_classes: Vec<FqName>,
    pub(crate) parent_classes: Vec<(FqName, FqName)>,
}

// A fragment must never be deep-copied;
//   see the module-level documentation.
assert_not_impl_any!(Fragment: Clone, Copy);

impl Fragment {
    /// Identity of the source unit this fragment was compiled from.
    ///
    /// Used only for error reporting.
    pub fn unit_name(&self) -> SymbolId {
        self.unit_name
    }

    /// External modules this fragment requires,
    ///   in evaluation order.
    pub fn imported_modules(&self) -> &[ImportedModule] {
        &self.imported_modules
    }

    /// Imported qualified names and their binding expressions,
    ///   in insertion order.
    pub fn imports(&self) -> impl Iterator<Item = (FqName, &Expression)> {
        self.imports.iter().map(|(name, expr)| (*name, expr))
    }

    pub fn declaration_block(&self) -> &GlobalBlock {
        &self.declaration_block
    }

    pub fn initializer_block(&self) -> &GlobalBlock {
        &self.initializer_block
    }

    pub fn export_block(&self) -> &GlobalBlock {
        &self.export_block
    }

    /// Names this fragment introduces into the module's top-level name
    ///   space,
    ///     in insertion order.
    pub fn name_bindings(&self) -> &[NameBinding] {
        &self.name_bindings
    }

    /// Classes this fragment declares,
    ///   in declaration order.
    pub fn declared_classes(&self) -> &[FqName] {
        &self.declared_classes
    }

    pub fn declares(&self, class: FqName) -> bool {
        self.declared_classes.contains(&class)
    }

    /// Inheritance edges from declared classes to their parent classes.
    ///
    /// Only classes with a superclass appear here.
    pub fn parent_classes(
        &self,
    ) -> impl Iterator<Item = (FqName, FqName)> + '_ {
        self.parent_classes.iter().copied()
    }

    pub fn parent_of(&self, class: FqName) -> Option<FqName> {
        self.parent_classes
            .iter()
            .find(|(cls, _)| *cls == class)
            .map(|(_, parent)| *parent)
    }

    /// Check the fragment's internal invariants.
    ///
    /// This verifies the structural invariants of the fragment itself:
    ///   parent edges must originate from locally declared classes,
    ///   import keys must not collide with local binding names,
    ///   and keys within each of the ordered mappings must be unique.
    ///
    /// It does _not_ verify that names referenced by block statements are
    ///   resolvable;
    ///     that is a precondition the front end's name-resolution stage
    ///     must already guarantee,
    ///       since statements are opaque at this layer.
    pub fn validate(&self) -> Result<(), MalformedFragmentError> {
        let mut seen = FxHashSet::default();
        for (name, _) in &self.imports {
            if !seen.insert(*name) {
                return Err(MalformedFragmentError::DuplicateImport(*name));
            }
        }

        let mut seen = FxHashSet::default();
        for binding in &self.name_bindings {
            if !seen.insert(binding.name()) {
                return Err(MalformedFragmentError::DuplicateBinding(
                    binding.name(),
                ));
            }
        }

        let declared: FxHashSet<FqName> =
            self.declared_classes.iter().copied().collect();

        if declared.len() != self.declared_classes.len() {
            // Report the first name that appears more than once.
            let mut seen = FxHashSet::default();
            for cls in &self.declared_classes {
                if !seen.insert(*cls) {
                    return Err(MalformedFragmentError::RedeclaredClass(
                        *cls,
                    ));
                }
            }
        }

        for (class, parent) in &self.parent_classes {
            if !declared.contains(class) {
                return Err(MalformedFragmentError::UndeclaredParentSource {
                    class: *class,
                    parent: *parent,
                });
            }
        }

        for entry in
            self.declaration_block.iter().chain(self.initializer_block.iter())
        {
            if let Some(owner) = entry.owner() {
                if !declared.contains(&owner) {
                    return Err(MalformedFragmentError::UndeclaredOwner(
                        owner,
                    ));
                }
            }
        }

        let bound: FxHashSet<LocalName> =
            self.name_bindings.iter().map(NameBinding::name).collect();

        for (name, _) in &self.imports {
            if bound.contains(name) {
                return Err(MalformedFragmentError::ImportBindingCollision(
                    *name,
                ));
            }
        }

        Ok(())
    }
}

/// Single construction path for [`Fragment`].
///
/// The builder is consumed by [`build`](FragmentBuilder::build),
///   which validates the assembled fragment;
///     a fragment that was successfully built therefore always satisfies
///     its internal invariants.
#[derive(Debug, Default)]
pub struct FragmentBuilder {
    unit_name: Option<SymbolId>,
    imported_modules: Vec<ImportedModule>,
    imports: Vec<(FqName, Expression)>,
    declaration_block: GlobalBlock,
    initializer_block: GlobalBlock,
    export_block: GlobalBlock,
    name_bindings: Vec<NameBinding>,
    declared_classes: Vec<FqName>,
    parent_classes: Vec<(FqName, FqName)>,
}

impl FragmentBuilder {
    pub fn new(unit_name: SymbolId) -> Self {
        Self {
            unit_name: Some(unit_name),
            ..Default::default()
        }
    }

    /// Require an external module.
    ///
    /// Modules are evaluated in the order provided;
    ///   duplicates across fragments are permitted and collapse at link
    ///   time by external name.
    pub fn import_module(mut self, module: ImportedModule) -> Self {
        self.imported_modules.push(module);
        self
    }

    /// Bind the imported qualified name `name` to the expression that
    ///   must be evaluated to obtain it locally.
    pub fn import(mut self, name: FqName, binding: Expression) -> Self {
        self.imports.push((name, binding));
        self
    }

    /// Append a declaration statement with no owning class.
    pub fn declare(mut self, stmt: Statement) -> Self {
        self.declaration_block.push(stmt);
        self
    }

    /// Record that this fragment declares `class`,
    ///   optionally with an inheritance edge to `parent`.
    ///
    /// This records only the metadata;
    ///   the class's statements are attributed separately via
    ///   [`class_declaration`](FragmentBuilder::class_declaration) and
    ///   [`class_initializer`](FragmentBuilder::class_initializer).
    pub fn declare_class(
        mut self,
        class: FqName,
        parent: Option<FqName>,
    ) -> Self {
        self.declared_classes.push(class);

        if let Some(parent) = parent {
            self.parent_classes.push((class, parent));
        }

        self
    }

    /// Append a declaration statement owned by the declared class
    ///   `class`.
    pub fn class_declaration(
        mut self,
        class: FqName,
        stmt: Statement,
    ) -> Self {
        self.declaration_block.push_owned(class, stmt);
        self
    }

    /// Append a module-level initialization statement.
    pub fn initialize(mut self, stmt: Statement) -> Self {
        self.initializer_block.push(stmt);
        self
    }

    /// Append an initialization statement owned by the declared class
    ///   `class`.
    pub fn class_initializer(
        mut self,
        class: FqName,
        stmt: Statement,
    ) -> Self {
        self.initializer_block.push_owned(class, stmt);
        self
    }

    /// Append an export statement.
    pub fn export(mut self, stmt: Statement) -> Self {
        self.export_block.push(stmt);
        self
    }

    /// Introduce `name` into the module's top-level name space,
    ///   referring to the underlying declaration `target`.
    pub fn bind(mut self, name: LocalName, target: FqName) -> Self {
        self.name_bindings.push(NameBinding::new(name, target));
        self
    }

    /// Assemble and validate the fragment.
    pub fn build(self) -> Result<Fragment, MalformedFragmentError> {
        let fragment = Fragment {
            // A builder constructed outside of `new` has no meaningful
            // unit to attribute errors to.
            unit_name: self
                .unit_name
                .ok_or(MalformedFragmentError::MissingUnitName)?,
            imported_modules: self.imported_modules,
            imports: self.imports,
            declaration_block: self.declaration_block,
            initializer_block: self.initializer_block,
            export_block: self.export_block,
            name_bindings: self.name_bindings,
            declared_classes: self.declared_classes,
            parent_classes: self.parent_classes,
        };

        fragment.validate()?;

        Ok(fragment)
    }
}

/// A single fragment violates its internal invariants.
///
/// Any of these represents a defect in the front end that produced the
///   fragment,
///     not a condition the caller can recover from.
#[derive(Debug, PartialEq, Eq)]
pub enum MalformedFragmentError {
    /// The builder was constructed without a source unit identity.
    MissingUnitName,

    /// An inheritance edge originates from a class that the fragment
    ///   does not declare.
    ///
    /// Parent edges describe _locally declared_ classes;
    ///   an edge from a foreign class cannot be attributed to this
    ///   fragment and indicates that metadata was routed to the wrong
    ///   unit.
    UndeclaredParentSource { class: FqName, parent: FqName },

    /// A block statement is attributed to a class that the fragment does
    ///   not declare.
    UndeclaredOwner(FqName),

    /// An imported qualified name collides with a local binding name.
    ///
    /// The import prelude and the top-level bindings share the linked
    ///   module's scope,
    ///     so such a collision would shadow one or the other
    ///     unpredictably.
    ImportBindingCollision(SymbolId),

    /// The same qualified name was imported more than once by this
    ///   fragment.
    DuplicateImport(FqName),

    /// The same local name was bound more than once by this fragment.
    DuplicateBinding(LocalName),

    /// The same class was declared more than once by this fragment.
    RedeclaredClass(FqName),
}

impl Display for MalformedFragmentError {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        use MalformedFragmentError::*;

        match self {
            MissingUnitName => {
                write!(fmt, "fragment is missing a source unit identity")
            }
            UndeclaredParentSource { class, parent } => write!(
                fmt,
                "inheritance edge `{}` -> `{}` references a class not \
                     declared by this fragment",
                class, parent,
            ),
            UndeclaredOwner(class) => write!(
                fmt,
                "statement attributed to class `{}`, which is not \
                     declared by this fragment",
                class,
            ),
            ImportBindingCollision(name) => write!(
                fmt,
                "imported name `{}` collides with a local binding",
                name,
            ),
            DuplicateImport(name) => {
                write!(fmt, "duplicate import of `{}`", name)
            }
            DuplicateBinding(name) => {
                write!(fmt, "duplicate binding of local name `{}`", name)
            }
            RedeclaredClass(name) => {
                write!(fmt, "class `{}` declared more than once", name)
            }
        }
    }
}

impl std::error::Error for MalformedFragmentError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        None
    }
}

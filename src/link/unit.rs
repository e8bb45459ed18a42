// Linked unit
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

//! The merged result of linking a sequence of fragments.
//!
//! A [`LinkedUnit`] is the concatenation,
//!   in link order,
//!   of all surviving declaration/initializer/export content,
//!     plus a merged import prelude and a merged name-binding table.
//! It is immutable once produced;
//!   ownership passes entirely to the external emitter,
//!     which consumes it in phase order via
//!     [`accept`](LinkedUnit::accept) or the individual accessors.
//!
//! Like [`Fragment`](crate::fragment::Fragment),
//!   a linked unit is not cloneable.

use crate::ast::{
    Expression, FqName, GlobalBlock, ImportedModule, NameBinding,
};
use crate::visit::{BlockPhase, Visitor};

/// A single coherent output module merged from an ordered sequence of
///   fragments.
///
/// Constructed only by the [linker](super::Linker),
///   and only atomically:
///     no field is observable unless the entire merge succeeded.
#[derive(Debug, Default, PartialEq)]
pub struct LinkedUnit {
    pub(super) imported_modules: Vec<ImportedModule>,
    pub(super) imports: Vec<(FqName, Expression)>,
    pub(super) declarations: GlobalBlock,
    pub(super) initializers: GlobalBlock,
    pub(super) exports: GlobalBlock,
    pub(super) name_bindings: Vec<NameBinding>,
    pub(super) parent_classes: Vec<(FqName, FqName)>,
    pub(super) inheritance_order: Vec<FqName>,
}

// The result of a link is as authoritative as its input fragments;
//   see the module-level documentation.
assert_not_impl_any!(LinkedUnit: Clone, Copy);

impl LinkedUnit {
    /// External modules required by the unit,
    ///   deduplicated by external name,
    ///   first-seen order preserved.
    pub fn imported_modules(&self) -> &[ImportedModule] {
        &self.imported_modules
    }

    /// Merged import bindings,
    ///   first-seen order preserved,
    ///   each imported qualified name listed exactly once.
    pub fn imports(&self) -> impl Iterator<Item = (FqName, &Expression)> {
        self.imports.iter().map(|(name, expr)| (*name, expr))
    }

    /// Surviving declaration statements in link order.
    pub fn declarations(&self) -> &GlobalBlock {
        &self.declarations
    }

    /// Surviving initializer statements,
    ///   in exactly the relative order their fragments were supplied.
    pub fn initializers(&self) -> &GlobalBlock {
        &self.initializers
    }

    /// Export statements in first-seen order.
    pub fn exports(&self) -> &GlobalBlock {
        &self.exports
    }

    /// Merged top-level name bindings,
    ///   first-seen binding per local name.
    pub fn name_bindings(&self) -> &[NameBinding] {
        &self.name_bindings
    }

    /// Surviving inheritance edges.
    ///
    /// Edges whose subclass declaration was dropped as a duplicate are
    ///   omitted
    ///     (their prototype wiring was already emitted by the earlier
    ///       link that declared the class).
    /// Empty when the linker was configured not to track parent edges.
    pub fn parent_classes(
        &self,
    ) -> impl Iterator<Item = (FqName, FqName)> + '_ {
        self.parent_classes.iter().copied()
    }

    /// Emission order for prototype-chain wiring.
    ///
    /// Contains every class that participates as a subclass,
    ///   ordered so that any class appearing here that is also a parent
    ///   precedes its children;
    ///     root classes
    ///       (those with no parent edge)
    ///       need no wiring and are omitted.
    /// Empty when the linker was configured not to track parent edges.
    pub fn inheritance_order(&self) -> &[FqName] {
        &self.inheritance_order
    }

    /// Whether every phase and the prelude are empty.
    pub fn is_empty(&self) -> bool {
        self.imported_modules.is_empty()
            && self.imports.is_empty()
            && self.declarations.is_empty()
            && self.initializers.is_empty()
            && self.exports.is_empty()
            && self.name_bindings.is_empty()
    }

    /// Visit the unit's content in emission order:
    ///   import prelude
    ///     (modules, then import bindings, then name bindings),
    ///   then the declaration,
    ///   initializer,
    ///   and export phases.
    pub fn accept(&self, visitor: &mut impl Visitor) {
        for module in &self.imported_modules {
            visitor.visit_imported_module(module);
        }

        for (name, binding) in self.imports() {
            visitor.visit_import(name, binding);
        }

        for binding in &self.name_bindings {
            visitor.visit_name_binding(binding);
        }

        for (phase, block) in [
            (BlockPhase::Declaration, &self.declarations),
            (BlockPhase::Initializer, &self.initializers),
            (BlockPhase::Export, &self.exports),
        ] {
            for entry in block {
                visitor.visit_statement(
                    phase,
                    entry.owner(),
                    entry.statement(),
                );
            }
        }
    }
}

// Fragment and linked-unit traversals
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

//! Traversal over fragment and linked-unit content.
//!
//! The emitter
//!   (out of scope for this crate)
//!   consumes linked content in a fixed phase order:
//!     import prelude,
//!     then declarations,
//!     then initializers,
//!     then exports.
//! [`walk_fragment`] and
//!   [`LinkedUnit::accept`](crate::link::LinkedUnit::accept)
//!   visit content in exactly that order,
//!     which mirrors the order the phases execute at module load time.
//!
//! [`Visitor`] is a capability set:
//!   every method has an empty default body,
//!     so a visitor implements only the methods for the content it cares
//!     about.
//! This replaces open double-dispatch
//!   (`accept`/`traverse` over an open class hierarchy)
//!   with a closed variant family and a generic walk;
//!     the traversal contract is identical.

use crate::ast::{
    Expression, FqName, ImportedModule, NameBinding, Statement,
};
use crate::fragment::Fragment;

/// The statement phase being visited.
///
/// Phases are emitted
///   (and execute)
///   in the order of this enum's variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum BlockPhase {
    Declaration,
    Initializer,
    Export,
}

/// Capability set for fragment and linked-unit traversal.
///
/// All methods default to no-ops;
///   implement only those of interest.
pub trait Visitor {
    /// An external module reference in the import prelude.
    fn visit_imported_module(&mut self, _module: &ImportedModule) {}

    /// An imported qualified name and the expression that must be
    ///   evaluated to obtain it locally.
    fn visit_import(&mut self, _name: FqName, _binding: &Expression) {}

    /// A top-level name binding.
    fn visit_name_binding(&mut self, _binding: &NameBinding) {}

    /// A statement of one of the three ordered blocks.
    ///
    /// Statements are visited in block order within each phase and in
    ///   phase order across phases.
    fn visit_statement(
        &mut self,
        _phase: BlockPhase,
        _owner: Option<FqName>,
        _stmt: &Statement,
    ) {
    }
}

/// Visit every part of `fragment` in emission order.
///
/// Order: module references,
///   then import bindings,
///   then name bindings,
///   then the declaration,
///   initializer,
///   and export blocks.
pub fn walk_fragment(fragment: &Fragment, visitor: &mut impl Visitor) {
    for module in fragment.imported_modules() {
        visitor.visit_imported_module(module);
    }

    for (name, binding) in fragment.imports() {
        visitor.visit_import(name, binding);
    }

    for binding in fragment.name_bindings() {
        visitor.visit_name_binding(binding);
    }

    for (phase, block) in [
        (BlockPhase::Declaration, fragment.declaration_block()),
        (BlockPhase::Initializer, fragment.initializer_block()),
        (BlockPhase::Export, fragment.export_block()),
    ] {
        for entry in block {
            visitor.visit_statement(phase, entry.owner(), entry.statement());
        }
    }
}

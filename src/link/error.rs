// Link errors
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

//! Errors resulting from linking fragments.
//!
//! Every variant is fail-fast and aborts the entire link;
//!   the linker never produces a partially merged unit.
//! None of these are retryable:
//!   fragments are deterministic values,
//!     so any of these errors means the upstream compilation pipeline
//!     produced mutually inconsistent fragments,
//!       not that a transient condition occurred.

use crate::ast::{FqName, LocalName};
use crate::fragment::MalformedFragmentError;
use crate::sym::SymbolId;
use std::fmt::{self, Display};

/// An error preventing fragments from being merged into a linked unit.
#[derive(Debug, PartialEq, Eq)]
pub enum LinkError {
    /// A fragment violates its internal invariants.
    ///
    /// Fragments are expected to be validated before they reach the
    ///   linker;
    ///     encountering this here means the front end handed over a
    ///     fragment it never validated.
    MalformedFragment {
        /// Identity of the source unit the offending fragment was
        ///   compiled from.
        unit: SymbolId,
        source: MalformedFragmentError,
    },

    /// An inheritance edge cannot be satisfied.
    ///
    /// The parent class is neither in the session registry,
    ///   nor declared by any fragment of the input sequence,
    ///   nor satisfied by an import.
    /// Fragments must be supplied such that inheritance producers are
    ///   part of the link
    ///     (or of a prior link in the session);
    ///   the linker will not reorder fragments to repair this,
    ///     since reordering would change observable side-effect order.
    UnresolvedParent { class: FqName, parent: FqName },

    /// The inheritance edges of the input form a cycle.
    ///
    /// A cyclic parent chain can never be emitted meaningfully,
    ///   so it is rejected before any merging takes place.
    InheritanceCycle(Vec<FqName>),

    /// Two fragments bind the same imported qualified name to
    ///   structurally different expressions.
    ConflictingImport(FqName),

    /// Two fragments bind the same local name to different underlying
    ///   declarations.
    DuplicateBinding(LocalName),
}

impl Display for LinkError {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        use LinkError::*;

        match self {
            MalformedFragment { unit, source } => {
                write!(fmt, "malformed fragment `{}`: {}", unit, source)
            }
            UnresolvedParent { class, parent } => write!(
                fmt,
                "class `{}` extends `{}`, which is not declared by any \
                     fragment, prior link, or import",
                class, parent,
            ),
            InheritanceCycle(classes) => {
                write!(fmt, "cyclic inheritance chain involving ")?;

                let mut sep = "";
                for class in classes {
                    write!(fmt, "{}`{}`", sep, class)?;
                    sep = ", ";
                }

                Ok(())
            }
            ConflictingImport(name) => write!(
                fmt,
                "imported name `{}` is bound to conflicting expressions",
                name,
            ),
            DuplicateBinding(name) => write!(
                fmt,
                "local name `{}` is bound to different declarations",
                name,
            ),
        }
    }
}

impl std::error::Error for LinkError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::MalformedFragment { source, .. } => Some(source),
            _ => None,
        }
    }
}

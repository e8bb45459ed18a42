// Global constants across the entirety of fraglink
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

//! System-wide static configuration.
//!
//! Subsystems should reference these values rather than defining their own
//!   and risk incompatibilities or maintenance issues as requirements
//!   change.
//!
//! By convention,
//!   import this entire module rather than individual members and reference
//!   them as `global::foo` to emphasize their nature and risk.

use std::num;

/// A size capable of representing every interned string in a linking
///   session.
///
/// A linker sees the union of all symbols of all fragments of a program,
///   so this must accommodate far more strings than any single compiled
///   unit would produce.
pub type SymSize = u32;

/// A non-zero equivalent of [`SymSize`].
pub type NonZeroSymSize = num::NonZeroU32;

/// Initial capacity of the global interner's pool.
///
/// Even small programs intern hundreds of names once imports and
///   statement text are accounted for;
///     starting with a reasonable capacity avoids rehashing during the
///     busiest period of interning
///       (fragment construction at the start of a session).
pub const INIT_GLOBAL_INTERNER_CAPACITY: usize = 1024;

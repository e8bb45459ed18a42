// Fragment linker
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

//! The [linker][] merges an ordered sequence of
//!   [fragments](crate::fragment::Fragment) into a single [`LinkedUnit`].
//!
//! [linker]: https://en.wikipedia.org/wiki/Linker_(computing)
//!
//! Fragments may be produced by independent,
//!   incrementally compiled source units,
//!     so the same class may arrive in fragments compiled at different
//!     times.
//! The linker guarantees a deterministic,
//!   side-effect-preserving result:
//!
//!   - declarations are never duplicated,
//!       tracked across incremental re-links by a session-scoped
//!       [`ClassRegistry`];
//!   - initializer side effects are emitted in exactly the relative
//!       order fragments were supplied
//!         (fragments are never reordered);
//!   - imports are deduplicated by identity with first-seen order
//!       preserved;
//!       and
//!   - inheritance edges between classes are verified to be satisfiable
//!       and surfaced to the emitter in parent-before-child order.
//!
//! Linking is a single-threaded,
//!   synchronous,
//!   non-suspending computation over already-resident data;
//!     it performs no I/O.
//! The result is constructed atomically:
//!   either a complete [`LinkedUnit`] is produced,
//!     or the first [`LinkError`] encountered is returned and no output
//!     is observable.

mod error;
mod linker;
mod unit;

pub mod registry;

pub use error::LinkError;
pub use linker::{link, LinkResult, Linker, LinkerConfig};
pub use registry::ClassRegistry;
pub use unit::LinkedUnit;

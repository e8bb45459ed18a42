// String internment system
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

//! String internment system.
//!
//! Interned strings are represented by an integer [`SymbolId`],
//!   created by an [`Interner`].
//! The same [`SymbolId`] will always be produced for a given string,
//!   so comparing two symbols for equality is an `O(1)` integer
//!   comparison regardless of string length.
//! Qualified names,
//!   local binding names,
//!   module names,
//!   and raw statement text are all held as symbols throughout this
//!   crate.
//!
//! The most common way to intern strings is using the global interner,
//!   exposed through two traits:
//!
//!   - [`GlobalSymbolIntern`] provides an `intern` method on any
//!       [`&str`] (e.g. `"foo".intern()`); and
//!   - [`GlobalSymbolResolve`] provides a `lookup_str` method on
//!       [`SymbolId`] which resolves the symbol to a `'static` string
//!       slice within the pool.
//!
//! ```
//! use fraglink::sym::{GlobalSymbolIntern, GlobalSymbolResolve, SymbolId};
//!
//! let foo: SymbolId = "foo".intern();
//!
//! // Interning the same string twice returns the same symbol.
//! assert_eq!(foo, "foo".intern());
//!
//! // Different strings intern to different symbols.
//! assert_ne!(foo, "bar".intern());
//!
//! // Interned slices can be looked up by their symbol id.
//! assert_eq!("foo", foo.lookup_str());
//! ```
//!
//! Symbols are expected to be interned as soon as strings are
//!   encountered;
//!     processing stages hold only [`SymbolId`] and resolve strings at
//!     the last moment,
//!       such as when rendering an error or writing a target.
//! The global interner is thread-local and lazily initialized on first
//!   use;
//!     it is never deallocated,
//!       so resolved slices hold a `'static` lifetime.
//! Linking is single-threaded
//!   (see the [linker](crate::link) for the concurrency model),
//!   so thread-local storage costs nothing here.
//!
//! Internment Mechanism
//! ====================
//! The [`DefaultInterner`] is [`FxArenaInterner`]:
//!   an [arena](bumpalo)-allocated intern pool mapped by the
//!   [Fx Hash][fxhash] hash function.
//! Strings are compared against the existing pool using a `HashMap`;
//!   new strings are copied into the arena at a freshly allocated
//!   [`SymbolId`] index.
//! The arena provides a stable location in memory for symbol data for
//!   the lifetime of the interner.

mod interner;
mod symbol;

pub use interner::{
    ArenaInterner, DefaultInterner, FxArenaInterner, Interner,
};
pub use symbol::{GlobalSymbolIntern, GlobalSymbolResolve, SymbolId};

// String internment symbol objects
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

//! Symbol objects representing interned strings.
//!
//! See the [parent module](super) for more information.

use super::{DefaultInterner, Interner};
use crate::global;
use std::fmt::{Debug, Display};
use std::ops::Deref;
use std::thread::LocalKey;

/// Unique symbol identifier produced by an [`Interner`].
///
/// This newtype helps to prevent other indexes from being used where a
///   symbol index is expected.
///
/// The index `0` is never valid because of [`global::NonZeroSymSize`],
///   which allows us to have `Option<SymbolId>` at no space cost.
///
/// Symbol Strings
/// ==============
/// To resolve a [`SymbolId`] into the string that it represents,
///   see either [`GlobalSymbolResolve::lookup_str`] or
///   [`Interner::index_lookup`].
///
/// Symbols allocated using the global interner will automatically resolve
///   to strings via [`Display`].
/// _This should be done at the last moment_ before outputting,
///   such as before writing to a target or displaying an error to the
///   user.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SymbolId(pub(super) global::NonZeroSymSize);
assert_eq_size!(Option<SymbolId>, SymbolId);

impl SymbolId {
    /// Construct index from an unchecked non-zero value.
    ///
    /// This does not verify that `n > 0` and so must only be used in
    ///   contexts where this invariant is guaranteed to hold.
    pub(super) unsafe fn from_int_unchecked(n: global::SymSize) -> SymbolId {
        SymbolId(global::NonZeroSymSize::new_unchecked(n))
    }

    pub fn as_usize(self) -> usize {
        self.0.get() as usize
    }

    /// Construct index from a non-zero value for testing.
    ///
    /// Panics
    /// ------
    /// Will panic if `n == 0`.
    #[cfg(test)]
    pub fn test_from_int(n: global::SymSize) -> SymbolId {
        SymbolId(global::NonZeroSymSize::new(n).unwrap())
    }
}

impl From<SymbolId> for usize {
    fn from(value: SymbolId) -> usize {
        value.as_usize()
    }
}

thread_local! {
    pub(super) static INTERNER: DefaultInterner<'static> =
        DefaultInterner::with_capacity(global::INIT_GLOBAL_INTERNER_CAPACITY);
}

/// Acquire a static reference to the global interner.
///
/// The global interner is static and thread-local.
/// It is created using the [`thread_local!`] macro,
///   which produces a [`LocalKey`] that provides access with a lifetime
///     that cannot exceed that of the closure.
/// This is a problem,
///   because we must return a value from the interner's storage.
///
/// This function transmutes the lifetime of [`LocalKey`] back to
///   `'static`.
/// Since the lifetime of the interner's arena storage is already
///   `'static`,
///     the retrieved interner can then be used to return a static string
///     slice without any further unsafe code.
///
/// This lifetime transmutation is expected to be safe,
///   because the thread-local storage is never deallocated,
///     and the storage is only accessible to one thread.
fn with_static_interner<F, R>(f: F) -> R
where
    F: FnOnce(&'static DefaultInterner<'static>) -> R,
{
    INTERNER.with(|interner| {
        f(unsafe {
            // These type annotations are inferred, but please leave
            // them here; transmute is especially dangerous, and we want
            // to be sure reality always matches our expectations.
            std::mem::transmute::<
                &DefaultInterner<'static>,
                &'static DefaultInterner<'static>,
            >(interner)
        })
    })
}

/// Resolve a [`SymbolId`] to the string value it represents using the
///   global interner.
///
/// This exists as its own trait
///   (rather than simply adding to [`SymbolId`])
///   to make it easy to see what systems rely on global state.
pub trait GlobalSymbolResolve {
    /// Resolve a [`SymbolId`] allocated using the global interner.
    ///
    /// This name is intended to convey that this operation has a cost---a
    ///   lookup is performed on the global intern pool.
    /// This shouldn't be done more than is necessary.
    ///
    /// Panics
    /// ======
    /// This will panic if the symbol cannot be found.
    /// Such a situation should never occur if the interner is being used
    ///   properly and would represent a bug in the program.
    ///
    /// If a panic is a problem
    ///   (e.g. if you are looking up a symbol as _part_ of a panic),
    ///   use [`GlobalSymbolResolve::try_lookup_str`].
    fn lookup_str(&self) -> &'static str;

    /// Attempt to resolve a [`SymbolId`] allocated using the global
    ///   interner.
    ///
    /// Unlike [`GlobalSymbolResolve::lookup_str`],
    ///   this cannot panic.
    fn try_lookup_str(&self) -> Option<&'static str>;
}

impl GlobalSymbolResolve for SymbolId {
    fn lookup_str(&self) -> &'static str {
        with_static_interner(|interner| {
            interner.index_lookup(*self).unwrap_or_else(|| {
                // If the system is being used properly, this should never
                // happen (we'd only look up symbols allocated through this
                // interner).
                panic!(
                    "failed to resolve SymbolId({}) using global \
                         interner of length {}",
                    self.0.get(),
                    interner.len()
                )
            })
        })
    }

    fn try_lookup_str(&self) -> Option<&'static str> {
        with_static_interner(|interner| interner.index_lookup(*self))
    }
}

impl Display for SymbolId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.lookup_str())
    }
}

impl Debug for SymbolId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // We have to be careful here when looking up the symbol, since this
        // may be called during a panic, and we don't want to panic yet
        // again if we cannot find the symbol.
        write!(
            f,
            "SymbolId({} \"{}\")",
            self.0.get(),
            self.try_lookup_str().unwrap_or("<#!UNKNOWN_SYMBOL>")
        )
    }
}

/// Intern a string using the global interner.
///
/// This provides a convenient API that creates the appearance that string
///   interning is a core Rust language feature
///   (e.g. `"foo".intern()`).
/// Symbols are so pervasive throughout this system that they may as well
///   be,
///     so that they are natural to work with.
pub trait GlobalSymbolIntern {
    /// Intern a string using the global interner.
    ///
    /// See [`crate::sym`] for more information.
    fn intern(self) -> SymbolId;
}

impl GlobalSymbolIntern for &str {
    fn intern(self) -> SymbolId {
        with_static_interner(|interner| interner.intern(self))
    }
}

impl<T> From<T> for SymbolId
where
    T: Deref<Target = str>,
{
    fn from(value: T) -> Self {
        value.intern()
    }
}

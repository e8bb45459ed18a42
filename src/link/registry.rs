// Session-scoped class registry
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

//! Record of class declarations already emitted in a linking session.
//!
//! The registry is what makes incremental re-linking safe:
//!   a class declared by a fragment of an earlier link in the same
//!   session is dropped from later linked units rather than
//!   re-declared.
//!
//! A registry is owned by the caller and lives for exactly one linking
//!   session.
//! It is monotonic---names are only ever added---so
//!   starting a new session means constructing a fresh instance.
//! Sessions running in parallel
//!   (linking independent output modules)
//!   must each own their own registry;
//!     there is no shared state between them.

use crate::ast::FqName;
use fxhash::FxHashSet;

/// Qualified class names already emitted by previously linked fragments
///   in the current session.
///
/// See the [module-level documentation](self) for lifecycle details.
#[derive(Debug, Default)]
pub struct ClassRegistry {
    emitted: FxHashSet<FqName>,
}

impl ClassRegistry {
    /// Fresh registry for a new linking session.
    pub fn new() -> Self {
        Self {
            ..Default::default()
        }
    }

    /// Whether `class` has already been emitted this session.
    pub fn contains(&self, class: FqName) -> bool {
        self.emitted.contains(&class)
    }

    /// Record that `class` has been emitted.
    ///
    /// Recording an already-present name is a no-op;
    ///   the return value indicates whether the name was newly recorded.
    pub fn record(&mut self, class: FqName) -> bool {
        self.emitted.insert(class)
    }

    /// Number of classes emitted this session.
    pub fn len(&self) -> usize {
        self.emitted.len()
    }

    pub fn is_empty(&self) -> bool {
        self.emitted.is_empty()
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::sym::GlobalSymbolIntern;

    type Sut = ClassRegistry;

    #[test]
    fn registry_empty() {
        let sut = Sut::new();

        assert!(sut.is_empty());
        assert!(!sut.contains("pkg.Cls".intern()));
    }

    #[test]
    fn record_adds_membership() {
        let mut sut = Sut::new();
        let cls = "pkg.Cls".intern();

        assert!(sut.record(cls));
        assert!(sut.contains(cls));
        assert_eq!(1, sut.len());
    }

    #[test]
    fn record_is_idempotent() {
        let mut sut = Sut::new();
        let cls = "pkg.Cls".intern();

        assert!(sut.record(cls));
        assert!(!sut.record(cls), "second record must be a no-op");
        assert_eq!(1, sut.len());
    }
}

// Fragment merge/link algorithm
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

//! Merging of an ordered fragment sequence into a [`LinkedUnit`].
//!
//! See the [parent module](super) for the guarantees the linker
//!   provides.
//!
//! The link proceeds in passes:
//!
//!  1. every fragment's internal invariants are re-checked
//!       (a defensive restatement of the front end's precondition);
//!  2. every inheritance edge is verified to be satisfiable---the parent
//!       must be in the session [`ClassRegistry`],
//!         declared by a fragment of the sequence,
//!         or satisfied by an import---and
//!       the edges must be acyclic;
//!  3. fragments are merged in input order,
//!       dropping declaration/initializer statements of classes the
//!       registry has already seen.
//!
//! The sequence as a whole satisfies an edge regardless of position
//!   because the unit is assembled atomically and prototype wiring is
//!   ordered afterward by [`LinkedUnit::inheritance_order`];
//!     what is _never_ done is reordering the fragments themselves,
//!       which would change observable initializer and module
//!       side-effect order.
//!
//! The registry is updated only once the entire merge has succeeded,
//!   so a failed link leaves the session exactly as it found it.

use super::{ClassRegistry, LinkError, LinkedUnit};
use crate::ast::FqName;
use crate::fragment::Fragment;
use fxhash::{FxHashMap, FxHashSet};
use petgraph::algo::tarjan_scc;
use petgraph::graphmap::DiGraphMap;


/// Result of [`Linker::link`].
pub type LinkResult<T = LinkedUnit> = Result<T, LinkError>;

/// Configuration of a [`Linker`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LinkerConfig {
    /// Whether to retain full inheritance edges.
    ///
    /// When enabled
    ///   (the default),
    ///   the linker verifies that every parent edge is satisfiable,
    ///     rejects cyclic chains,
    ///     and computes the prototype-wiring order for the emitter.
    /// When disabled,
    ///   only class _presence_ is tracked---declaration deduplication
    ///   still applies,
    ///     but ordering verification is skipped and the linked unit
    ///     carries no edges.
    pub track_parent_edges: bool,
}

impl Default for LinkerConfig {
    fn default() -> Self {
        Self {
            track_parent_edges: true,
        }
    }
}

/// Merges an ordered sequence of [`Fragment`]s into one [`LinkedUnit`].
///
/// A linker borrows the session's [`ClassRegistry`] for the duration of
///   one link;
///     successive links against the same registry form one linking
///     session,
///       with class declarations deduplicated across all of them.
pub struct Linker<'r> {
    registry: &'r mut ClassRegistry,
    config: LinkerConfig,
}

impl<'r> Linker<'r> {
    pub fn new(registry: &'r mut ClassRegistry) -> Self {
        Self::with_config(registry, Default::default())
    }

    pub fn with_config(
        registry: &'r mut ClassRegistry,
        config: LinkerConfig,
    ) -> Self {
        Self { registry, config }
    }

    /// Merge `fragments`,
    ///   in the exact order supplied,
    ///   into a single linked unit.
    ///
    /// An empty sequence yields an empty unit.
    /// On error,
    ///   no output is produced and the session registry is left
    ///   untouched.
    pub fn link(mut self, fragments: Vec<Fragment>) -> LinkResult {
        for fragment in &fragments {
            fragment.validate().map_err(|source| {
                LinkError::MalformedFragment {
                    unit: fragment.unit_name(),
                    source,
                }
            })?;
        }

        if self.config.track_parent_edges {
            self.check_parents(&fragments)?;
        }

        let mut unit = LinkedUnit::default();

        // Classes newly declared by this link; committed to the session
        // registry only if the entire merge succeeds.
        let mut newly_declared = FxHashSet::default();

        let mut seen_modules = FxHashSet::default();
        let mut import_table: FxHashMap<FqName, usize> = Default::default();
        let mut binding_table = FxHashMap::default();

        for fragment in fragments {
            let Fragment {
                imported_modules,
                imports,
                declaration_block,
                initializer_block,
                export_block,
                name_bindings,
                declared_classes,
                parent_classes,
                ..
            } = fragment;

            // Classes whose declarations were already emitted, either by
            // a prior link in this session or by an earlier fragment of
            // this sequence.  Dedup is by name identity alone: identical
            // qualified names are trusted to denote a single
            // authoritative declaration.
            let mut dropped = FxHashSet::default();

            for cls in declared_classes {
                if self.registry.contains(cls) || !newly_declared.insert(cls)
                {
                    dropped.insert(cls);
                }
            }

            for module in imported_modules {
                if seen_modules.insert(module.external_name()) {
                    unit.imported_modules.push(module);
                }
            }

            for (name, expr) in imports {
                match import_table.get(&name) {
                    Some(&at) => {
                        if unit.imports[at].1 != expr {
                            return Err(LinkError::ConflictingImport(name));
                        }
                        // Harmless duplicate; first binding wins.
                    }
                    None => {
                        import_table.insert(name, unit.imports.len());
                        unit.imports.push((name, expr));
                    }
                }
            }

            for entry in declaration_block {
                if entry.owner().map_or(true, |cls| !dropped.contains(&cls))
                {
                    unit.declarations.push_entry(entry);
                }
            }

            // Initializer side effects are order-sensitive: they are
            // never reordered or deduplicated, only dropped alongside
            // their owning class's declaration.
            for entry in initializer_block {
                if entry.owner().map_or(true, |cls| !dropped.contains(&cls))
                {
                    unit.initializers.push_entry(entry);
                }
            }

            // Exports are never dropped by class dedup.
            for entry in export_block {
                unit.exports.push_entry(entry);
            }

            for binding in name_bindings {
                match binding_table.get(&binding.name()) {
                    Some(&target) => {
                        if target != binding.target() {
                            return Err(LinkError::DuplicateBinding(
                                binding.name(),
                            ));
                        }
                    }
                    None => {
                        binding_table
                            .insert(binding.name(), binding.target());
                        unit.name_bindings.push(binding);
                    }
                }
            }

            if self.config.track_parent_edges {
                // An edge for a dropped subclass was already emitted by
                // whichever link declared it.
                for (cls, parent) in parent_classes {
                    if !dropped.contains(&cls) {
                        unit.parent_classes.push((cls, parent));
                    }
                }
            }
        }

        if self.config.track_parent_edges {
            unit.inheritance_order =
                inheritance_order(&unit.parent_classes);
        }

        for cls in newly_declared {
            self.registry.record(cls);
        }

        Ok(unit)
    }

    /// Verify that every inheritance edge of the input is satisfiable
    ///   and that the edges are acyclic.
    ///
    /// Reported before any output is produced.
    fn check_parents(&self, fragments: &[Fragment]) -> LinkResult<()> {
        let declared: FxHashSet<FqName> = fragments
            .iter()
            .flat_map(|fragment| {
                fragment.declared_classes().iter().copied()
            })
            .collect();

        let imported: FxHashSet<FqName> = fragments
            .iter()
            .flat_map(|fragment| fragment.imports().map(|(name, _)| name))
            .collect();

        for fragment in fragments {
            for (class, parent) in fragment.parent_classes() {
                if self.registry.contains(parent)
                    || declared.contains(&parent)
                    || imported.contains(&parent)
                {
                    continue;
                }

                return Err(LinkError::UnresolvedParent { class, parent });
            }
        }

        let mut graph = DiGraphMap::<FqName, ()>::new();

        for fragment in fragments {
            for (class, parent) in fragment.parent_classes() {
                graph.add_edge(class, parent, ());
            }
        }

        // Inheritance chains must form a forest; unlike a dependency
        // graph between arbitrary identifiers, no cycle is permissible
        // here.
        for scc in tarjan_scc(&graph) {
            // Single-node SCCs are cyclic only if the node neighbors
            // itself.
            if scc.len() == 1 && !graph.contains_edge(scc[0], scc[0]) {
                continue;
            }

            return Err(LinkError::InheritanceCycle(scc));
        }

        Ok(())
    }
}

/// Order classes for prototype-chain emission.
///
/// Depth-first over parent edges with a visited set:
///   a subclass is emitted only after its parent chain,
///     and classes with no parent edge need no wiring and are omitted.
/// Iteration otherwise follows edge insertion order,
///   keeping the result deterministic.
fn inheritance_order(edges: &[(FqName, FqName)]) -> Vec<FqName> {
    let parents: FxHashMap<FqName, FqName> = edges.iter().copied().collect();

    let mut visited = FxHashSet::default();
    let mut order = Vec::with_capacity(edges.len());

    for (cls, _) in edges {
        order_class(*cls, &parents, &mut visited, &mut order);
    }

    order
}

fn order_class(
    cls: FqName,
    parents: &FxHashMap<FqName, FqName>,
    visited: &mut FxHashSet<FqName>,
    order: &mut Vec<FqName>,
) {
    if !visited.insert(cls) {
        return;
    }

    // Roots terminate the chain and receive no wiring of their own.
    let parent = match parents.get(&cls) {
        Some(parent) => *parent,
        None => return,
    };

    order_class(parent, parents, visited, order);
    order.push(cls);
}

/// Merge `fragments` into a single linked unit using the default
///   [`LinkerConfig`].
///
/// See [`Linker::link`].
pub fn link(
    fragments: Vec<Fragment>,
    registry: &mut ClassRegistry,
) -> LinkResult {
    Linker::new(registry).link(fragments)
}

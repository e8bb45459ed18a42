// Fragment linking integration tests
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

//! End-to-end linking through the public API,
//!   driving a small recording emitter over the linked result.

use fraglink::ast::{Expression, ImportedModule, Statement};
use fraglink::fragment::{Fragment, FragmentBuilder};
use fraglink::link::{link, ClassRegistry, LinkError, Linker};
use fraglink::sym::{GlobalSymbolIntern, GlobalSymbolResolve, SymbolId};
use fraglink::visit::{BlockPhase, Visitor};

fn text(s: &str) -> Statement {
    Statement::Text(s.intern())
}

/// Emitter that renders opaque statement text in visit order,
///   one line per event.
#[derive(Default)]
struct LineEmitter {
    lines: Vec<String>,
}

impl Visitor for LineEmitter {
    fn visit_imported_module(&mut self, module: &ImportedModule) {
        self.lines.push(format!(
            "var {} = require('{}');",
            module.internal_name(),
            module.external_name(),
        ));
    }

    fn visit_import(&mut self, name: SymbolId, _binding: &Expression) {
        self.lines.push(format!("// import {}", name));
    }

    fn visit_statement(
        &mut self,
        _phase: BlockPhase,
        _owner: Option<SymbolId>,
        stmt: &Statement,
    ) {
        if let Statement::Text(sym) = stmt {
            self.lines.push(sym.lookup_str().to_owned());
        }
    }
}

/// Two units of a small program:
///   a base library declaring a class,
///   and a dependent unit subclassing it.
fn base_unit() -> Fragment {
    let cls = "lib.Base".intern();

    FragmentBuilder::new("lib/base".intern())
        .import_module(ImportedModule::new("runtime".intern(), "$rt".intern()))
        .declare_class(cls, None)
        .class_declaration(cls, text("function Base() {}"))
        .initialize(text("registerLib();"))
        .export(text("exports.Base = Base;"))
        .bind("Base".intern(), cls)
        .build()
        .unwrap()
}

fn derived_unit() -> Fragment {
    let cls = "app.Derived".intern();

    FragmentBuilder::new("app/derived".intern())
        .import_module(ImportedModule::new("runtime".intern(), "$rt2".intern()))
        .declare_class(cls, Some("lib.Base".intern()))
        .class_declaration(cls, text("function Derived() {}"))
        .class_initializer(cls, text("Derived.setup();"))
        .export(text("exports.Derived = Derived;"))
        .bind("Derived".intern(), cls)
        .build()
        .unwrap()
}

#[test]
fn links_program_and_emits_in_phase_order() {
    let mut registry = ClassRegistry::new();

    let unit = link(vec![base_unit(), derived_unit()], &mut registry)
        .expect("program must link");

    let mut emitter = LineEmitter::default();
    unit.accept(&mut emitter);

    assert_eq!(
        vec![
            // Prelude: modules deduplicated by external name, first
            // alias winning.
            "var $rt = require('runtime');".to_owned(),
            // Declarations precede initializers, which precede exports,
            // regardless of the per-fragment interleaving above.
            "function Base() {}".to_owned(),
            "function Derived() {}".to_owned(),
            "registerLib();".to_owned(),
            "Derived.setup();".to_owned(),
            "exports.Base = Base;".to_owned(),
            "exports.Derived = Derived;".to_owned(),
        ],
        emitter.lines,
    );

    // Prototype wiring is required only for the subclass.
    assert_eq!(vec!["app.Derived".intern()], unit.inheritance_order());
    assert_eq!(2, unit.name_bindings().len());
}

#[test]
fn fragment_order_does_not_affect_linkability() {
    let mut registry = ClassRegistry::new();

    // Subclass before its parent's producer.
    let unit = link(vec![derived_unit(), base_unit()], &mut registry)
        .expect("order within a sequence must not matter for resolution");

    // Initializer side effects do follow the supplied order.
    assert_eq!(
        vec![text("Derived.setup();"), text("registerLib();")],
        unit.initializers().statements().cloned().collect::<Vec<_>>(),
    );
}

#[test]
fn session_spanning_links_deduplicate_declarations() {
    let mut registry = ClassRegistry::new();

    link(vec![base_unit()], &mut registry).expect("base must link");

    // Second link of the session: the base class is resupplied (e.g. by
    // a common-code bundle) alongside the derived unit.
    let relinked = link(vec![base_unit(), derived_unit()], &mut registry)
        .expect("re-link must succeed");

    assert_eq!(
        vec![text("function Derived() {}")],
        relinked
            .declarations()
            .statements()
            .cloned()
            .collect::<Vec<_>>(),
        "already-linked class declarations must not be re-emitted",
    );

    // Exports are resupplied in full; dropping them would break the
    // module's public surface.
    assert_eq!(2, relinked.exports().len());
}

#[test]
fn missing_parent_producer_fails_the_link() {
    let mut registry = ClassRegistry::new();

    match link(vec![derived_unit()], &mut registry) {
        Err(LinkError::UnresolvedParent { class, parent }) => {
            assert_eq!("app.Derived".intern(), class);
            assert_eq!("lib.Base".intern(), parent);
        }
        bad => panic!("expected UnresolvedParent: {:?}", bad),
    }

    // The failure must not have polluted the session.
    assert!(
        link(vec![base_unit(), derived_unit()], &mut registry).is_ok(),
        "registry must be untouched by the failed link",
    );
}

#[test]
fn linker_borrow_ends_with_link() {
    let mut registry = ClassRegistry::new();

    // Each link consumes its Linker, releasing the registry borrow.
    Linker::new(&mut registry)
        .link(vec![base_unit()])
        .expect("base must link");
    Linker::new(&mut registry)
        .link(vec![derived_unit()])
        .expect("derived must link against session state");

    assert_eq!(2, registry.len());
}

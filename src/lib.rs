// Fragment IR and linker for modular JavaScript code generation
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

//! Intermediate representation for a modular JavaScript code generator.
//!
//! Each independently compiled source unit yields a [`Fragment`]---a
//!   self-contained bundle of declarations,
//!     initialization code,
//!     exports,
//!     and import requirements.
//! The [linker](link) merges an ordered sequence of fragments into a
//!   single [`LinkedUnit`](link::LinkedUnit) without duplicating
//!   declarations,
//!     without breaking class-inheritance ordering,
//!     and without re-ordering observable side effects,
//!       even when the same class arrives in fragments compiled at
//!       different times (incremental re-compilation).
//!
//! The front end that produces fragment content and the emitter that
//!   serializes a linked unit are external collaborators;
//!     this crate only defines their shared boundary.
//!
//! [`Fragment`]: fragment::Fragment

// We build docs for private items.
#![allow(rustdoc::private_intra_doc_links)]

pub mod global;

#[macro_use]
extern crate static_assertions;

pub mod ast;
pub mod fragment;
pub mod link;
pub mod sym;
pub mod visit;

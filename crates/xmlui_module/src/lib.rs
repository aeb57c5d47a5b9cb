//! xmlui_module: Module resolution and code-behind collection.
//!
//! Script files form modules: top-level `function` declarations are hoisted,
//! `export const`/`export function` declarations are published, and
//! `import { a as b } from "path"` pulls exports from other modules whose
//! source text a [`ModuleResolver`] supplies. The collector then turns a
//! resolved root module into the `vars`/`functions` maps components use.

pub mod collector;
pub mod graph;
pub mod resolver;

pub use collector::{
    collect_code_behind, collect_code_behind_from_source, collect_from_graph,
    remove_code_behind_tokens_from_tree, CollectedDeclarations, CollectedFunction, CollectedVar,
};
pub use graph::{ExportedDeclaration, ImportedName, ModuleGraph, ModuleId, ScriptModule};
pub use resolver::{parse_script_module, ModuleErrors, ModuleResolver, ResolutionSession};

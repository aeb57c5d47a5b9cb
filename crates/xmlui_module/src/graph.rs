//! The module arena produced by one resolution session.

use serde::Serialize;
use xmlui_ast::node::{ConstStatement, FunctionDeclaration, Statement};
use xmlui_ast::position::PositionTable;
use xmlui_ast::types::NodeId;
use xmlui_core::OrderedMap;

/// Index of a module inside its [`ModuleGraph`].
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize)]
#[serde(transparent)]
pub struct ModuleId(pub u32);

impl ModuleId {
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// A declaration a module makes visible to its importers.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum ExportedDeclaration {
    Function(FunctionDeclaration),
    Const(ConstStatement),
}

impl ExportedDeclaration {
    pub fn as_function(&self) -> Option<&FunctionDeclaration> {
        match self {
            ExportedDeclaration::Function(func) => Some(func),
            ExportedDeclaration::Const(_) => None,
        }
    }
}

/// Where an imported name comes from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportedName {
    pub module: ModuleId,
    /// The name the declaring module exports it under.
    pub exported_name: String,
}

/// One parsed script file.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScriptModule {
    pub name: String,
    pub statements: Vec<Statement>,
    /// Top-level function declarations, hoisted.
    pub functions: OrderedMap<String, FunctionDeclaration>,
    pub exports: OrderedMap<String, ExportedDeclaration>,
    /// Local name to the imported declaration.
    pub imports: OrderedMap<String, ImportedName>,
    pub imported_modules: Vec<ModuleId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent: Option<ModuleId>,
    #[serde(skip)]
    pub source: String,
    #[serde(skip)]
    pub positions: PositionTable,
}

impl ScriptModule {
    /// The source text a node of this module spans.
    pub fn source_of(&self, id: NodeId) -> Option<String> {
        let pos = self.positions.get(id)?;
        let start = pos.start_position as usize;
        let end = (pos.end_position as usize).max(start);
        Some(self.source.chars().skip(start).take(end - start).collect())
    }
}

/// Every module reached from one root, in the order they were registered.
/// The root is always the first entry.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ModuleGraph {
    modules: Vec<ScriptModule>,
}

impl ModuleGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn add(&mut self, module: ScriptModule) -> ModuleId {
        let id = ModuleId(self.modules.len() as u32);
        self.modules.push(module);
        id
    }

    pub fn root(&self) -> Option<&ScriptModule> {
        self.modules.first()
    }

    pub fn get(&self, id: ModuleId) -> Option<&ScriptModule> {
        self.modules.get(id.index())
    }

    pub(crate) fn get_mut(&mut self, id: ModuleId) -> Option<&mut ScriptModule> {
        self.modules.get_mut(id.index())
    }

    /// Look a module up by name.
    pub fn find(&self, name: &str) -> Option<&ScriptModule> {
        self.modules.iter().find(|m| m.name == name)
    }

    /// The modules `id` imports.
    pub fn imports_of(&self, id: ModuleId) -> impl Iterator<Item = &ScriptModule> {
        self.get(id)
            .into_iter()
            .flat_map(|m| m.imported_modules.iter())
            .filter_map(|child| self.get(*child))
    }

    /// Resolve an imported name to the declaration it refers to.
    pub fn imported_declaration(&self, import: &ImportedName) -> Option<&ExportedDeclaration> {
        self.get(import.module)?.exports.get(&import.exported_name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ScriptModule> {
        self.modules.iter()
    }

    pub fn len(&self) -> usize {
        self.modules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }
}

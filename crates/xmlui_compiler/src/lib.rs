//! xmlui_compiler: The front-end façade.
//!
//! A [`Compiler`] holds the [`FrontEndOptions`] and the module resolver
//! and runs the stages for one source: size check, markup parsing and
//! transformation for markup files, module resolution and code-behind
//! collection for script files. [`Compiler::check_files`] runs many
//! markup files in parallel.

use std::path::{Path, PathBuf};

use log::debug;
use rayon::prelude::*;
use xmlui_diagnostics::{messages, Diagnostic};
use xmlui_markup::parse_markup;
use xmlui_module::{
    collect_code_behind, parse_script_module, CollectedDeclarations, ModuleErrors, ModuleGraph,
    ModuleResolver,
};
use xmlui_options::FrontEndOptions;
use xmlui_transform::{ComponentDef, ComponentOrCompound, TransformOptions, Transformer, ValueDef};

/// A resolver that finds nothing, for sources that may not import.
pub struct NoImports;

impl ModuleResolver for NoImports {
    fn resolve(&self, _parent_module: &str, _requested_path: &str) -> Option<String> {
        None
    }
}

#[derive(Debug, thiserror::Error)]
pub enum CompileError {
    #[error("cannot read '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("{0}")]
    Diagnostic(Diagnostic),
    #[error("module resolution failed in {} module(s)", .0.len())]
    Modules(ModuleErrors),
}

impl From<Diagnostic> for CompileError {
    fn from(diagnostic: Diagnostic) -> Self {
        CompileError::Diagnostic(diagnostic)
    }
}

/// A named source text.
#[derive(Debug, Clone)]
pub struct SourceFile {
    pub name: String,
    pub text: String,
}

impl SourceFile {
    pub fn new(name: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            text: text.into(),
        }
    }

    pub fn read(path: &Path) -> Result<Self, CompileError> {
        let text = std::fs::read_to_string(path).map_err(|source| CompileError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self::new(path.display().to_string(), text))
    }
}

/// The outcome of checking one file.
#[derive(Debug, Clone)]
pub struct FileReport {
    pub name: String,
    pub diagnostics: Vec<Diagnostic>,
}

impl FileReport {
    pub fn has_errors(&self) -> bool {
        self.diagnostics.iter().any(Diagnostic::is_error)
    }
}

pub struct Compiler<'r> {
    options: FrontEndOptions,
    resolver: &'r (dyn ModuleResolver + Sync),
}

impl Compiler<'static> {
    /// A compiler whose scripts cannot import modules.
    pub fn without_imports(options: FrontEndOptions) -> Self {
        Self::new(options, &NoImports)
    }
}

impl<'r> Compiler<'r> {
    pub fn new(options: FrontEndOptions, resolver: &'r (dyn ModuleResolver + Sync)) -> Self {
        Self { options, resolver }
    }

    pub fn options(&self) -> &FrontEndOptions {
        &self.options
    }

    /// Parse and transform one markup document.
    pub fn compile_markup(&self, source: &SourceFile) -> Result<ComponentOrCompound, Diagnostic> {
        self.check_size(source)?;
        let nodes = parse_markup(&source.text).map_err(|d| d.with_file(&source.name))?;
        let transformer = Transformer::new(self.transform_options(), self.resolver);
        let result = transformer
            .transform(&nodes)
            .map_err(|d| d.with_file(&source.name))?;
        debug!("compiled markup {}", source.name);
        Ok(result)
    }

    /// Collect the declarations of a script file. Module errors are part
    /// of the result.
    pub fn compile_script(&self, source: &SourceFile) -> Result<CollectedDeclarations, Diagnostic> {
        self.check_size(source)?;
        Ok(collect_code_behind(
            &source.name,
            &source.text,
            self.resolver,
            self.options.restrictive_mode,
        ))
    }

    /// Resolve the import graph rooted at a script file.
    pub fn resolve_modules(&self, source: &SourceFile) -> Result<ModuleGraph, CompileError> {
        self.check_size(source)?;
        parse_script_module(
            &source.name,
            &source.text,
            self.resolver,
            self.options.restrictive_mode,
        )
        .map_err(CompileError::Modules)
    }

    /// Compile many markup files in parallel. Reports come back in input
    /// order.
    pub fn check_files(&self, sources: &[SourceFile]) -> Vec<FileReport> {
        sources
            .par_iter()
            .map(|source| FileReport {
                name: source.name.clone(),
                diagnostics: self.check_markup(source),
            })
            .collect()
    }

    /// Every diagnostic of one markup file, script errors included.
    pub fn check_markup(&self, source: &SourceFile) -> Vec<Diagnostic> {
        match self.compile_markup(source) {
            Ok(result) => script_errors(&result)
                .into_iter()
                .map(|d| d.with_file(&source.name))
                .collect(),
            Err(diagnostic) => vec![diagnostic],
        }
    }

    fn transform_options(&self) -> TransformOptions {
        TransformOptions {
            root_module_name: self.options.root_module_name.clone(),
            restrictive_mode: self.options.restrictive_mode,
            collect_code_behind: self.options.collect_code_behind,
            strip_positions: self.options.strip_positions,
        }
    }

    fn check_size(&self, source: &SourceFile) -> Result<(), Diagnostic> {
        if source.text.len() > self.options.max_source_size {
            let limit = self.options.max_source_size.to_string();
            return Err(Diagnostic::new(&messages::SOURCE_TOO_LARGE_0_1, &[&source.name, &limit])
                .with_file(&source.name));
        }
        Ok(())
    }
}

/// The script errors recorded anywhere in a transformed document.
pub fn script_errors(result: &ComponentOrCompound) -> Vec<Diagnostic> {
    let mut pending: Vec<&ComponentDef> = Vec::new();
    match result {
        ComponentOrCompound::Component(def) => pending.push(def),
        ComponentOrCompound::Compound(def) => {
            pending.push(&def.component);
            push_value_components(def.vars.values(), &mut pending);
        }
    }

    let mut errors = Vec::new();
    while let Some(def) = pending.pop() {
        if let Some(script_error) = &def.script_error {
            errors.extend(script_error.values().flatten().cloned());
        }
        pending.extend(def.children.iter().rev());
        push_value_components(def.props.values().chain(def.vars.values()), &mut pending);
    }
    errors
}

fn push_value_components<'a>(
    values: impl Iterator<Item = &'a ValueDef>,
    pending: &mut Vec<&'a ComponentDef>,
) {
    let mut values: Vec<&ValueDef> = values.collect();
    while let Some(value) = values.pop() {
        match value {
            ValueDef::Value(_) => {}
            ValueDef::Component(def) => pending.push(def),
            ValueDef::Components(defs) => pending.extend(defs.iter()),
            ValueDef::Object(fields) => values.extend(fields.values()),
            ValueDef::Array(items) => values.extend(items.iter()),
        }
    }
}

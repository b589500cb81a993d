//! Declarative artifact table
//!
//! Every file the generator can produce is one row of [`ARTIFACTS`]: which
//! template renders it, where it lands, whether it is tool-owned or a one-time
//! scaffold, and whether an existing copy is protected. Selection, naming and
//! the write policy are all read from this table.

use std::path::PathBuf;

use crate::config::Config;
use crate::generation::RenderModel;

/// Who owns the file after generation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Durability {
    /// Tool-owned, replaced on every run
    Regenerated,
    /// Starting point for hand edits, still replaced wholesale
    Scaffolded,
}

/// What to do when the target already exists
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WritePolicy {
    Overwrite,
    SkipIfExists,
}

/// Base directory of an artifact's relative path
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Destination {
    OutputDir,
    ModuleRoot,
}

/// When an artifact takes part in a run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Condition {
    Always,
    HasListOperations,
    FullScaffold,
}

/// Relative location of an artifact
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArtifactLocation {
    Fixed(&'static str),
    /// The configured wire-format definition path
    ProtoPath,
}

/// Line-comment syntax used for the provenance header
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommentStyle {
    Slash,
    Hash,
}

impl CommentStyle {
    pub fn prefix(self) -> &'static str {
        match self {
            CommentStyle::Slash => "//",
            CommentStyle::Hash => "#",
        }
    }
}

/// One row of the artifact table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArtifactSpec {
    pub name: &'static str,
    /// Embedded template name
    pub template: &'static str,
    pub location: ArtifactLocation,
    pub durability: Durability,
    pub policy: WritePolicy,
    pub destination: Destination,
    pub condition: Condition,
    pub comment: CommentStyle,
}

const fn regenerated(
    name: &'static str,
    template: &'static str,
    location: ArtifactLocation,
    condition: Condition,
) -> ArtifactSpec {
    ArtifactSpec {
        name,
        template,
        location,
        durability: Durability::Regenerated,
        policy: WritePolicy::Overwrite,
        destination: Destination::OutputDir,
        condition,
        comment: CommentStyle::Slash,
    }
}

const fn scaffolded(
    name: &'static str,
    template: &'static str,
    path: &'static str,
    policy: WritePolicy,
    destination: Destination,
    comment: CommentStyle,
) -> ArtifactSpec {
    ArtifactSpec {
        name,
        template,
        location: ArtifactLocation::Fixed(path),
        durability: Durability::Scaffolded,
        policy,
        destination,
        condition: Condition::FullScaffold,
        comment,
    }
}

/// Every artifact, in render order
pub const ARTIFACTS: &[ArtifactSpec] = &[
    regenerated("client", "client.go", ArtifactLocation::Fixed("client.go"), Condition::Always),
    regenerated("server", "server.go", ArtifactLocation::Fixed("server.go"), Condition::Always),
    regenerated(
        "pagination",
        "pagination.go",
        ArtifactLocation::Fixed("pagination.go"),
        Condition::HasListOperations,
    ),
    regenerated("proto", "api.proto", ArtifactLocation::ProtoPath, Condition::Always),
    scaffolded(
        "daemon",
        "main.go",
        "cmd/server/main.go",
        WritePolicy::Overwrite,
        Destination::OutputDir,
        CommentStyle::Slash,
    ),
    scaffolded(
        "service",
        "service.go",
        "service.go",
        WritePolicy::Overwrite,
        Destination::OutputDir,
        CommentStyle::Slash,
    ),
    scaffolded(
        "service_test",
        "service_test.go",
        "service_test.go",
        WritePolicy::Overwrite,
        Destination::OutputDir,
        CommentStyle::Slash,
    ),
    scaffolded(
        "makefile",
        "Makefile",
        "Makefile",
        WritePolicy::Overwrite,
        Destination::ModuleRoot,
        CommentStyle::Hash,
    ),
    scaffolded(
        "buf",
        "buf.yaml",
        "buf.yaml",
        WritePolicy::SkipIfExists,
        Destination::OutputDir,
        CommentStyle::Hash,
    ),
    scaffolded(
        "buf_gen",
        "buf.gen.yaml",
        "buf.gen.yaml",
        WritePolicy::SkipIfExists,
        Destination::OutputDir,
        CommentStyle::Hash,
    ),
];

impl ArtifactSpec {
    /// Whether this artifact takes part in a run over `model`
    pub fn is_selected(&self, model: &RenderModel) -> bool {
        match self.condition {
            Condition::Always => true,
            Condition::HasListOperations => model.has_list_operations,
            Condition::FullScaffold => model.full_scaffold,
        }
    }

    /// Path relative to the artifact's destination directory
    pub fn relative_path(&self, config: &Config) -> PathBuf {
        match self.location {
            ArtifactLocation::Fixed(path) => PathBuf::from(path),
            ArtifactLocation::ProtoPath => PathBuf::from(&config.artifact_path),
        }
    }

    /// Absolute target path on disk
    pub fn target_path(&self, config: &Config) -> PathBuf {
        let base = match self.destination {
            Destination::OutputDir => &config.output_dir,
            Destination::ModuleRoot => &config.module_root,
        };
        base.join(self.relative_path(config))
    }

    /// Provenance line written at the top of the artifact
    pub fn header(&self, generated_at: &str) -> String {
        let c = self.comment.prefix();
        match self.durability {
            Durability::Regenerated => {
                format!("{c} Code generated by oasrpc at {generated_at}. DO NOT EDIT.")
            }
            Durability::Scaffolded => format!(
                "{c} Generated by oasrpc at {generated_at}. Safe to edit; regeneration replaces this file wholesale."
            ),
        }
    }
}

/// Table rows selected for `model`, in table order
pub fn selected(model: &RenderModel) -> impl Iterator<Item = &'static ArtifactSpec> + '_ {
    ARTIFACTS.iter().filter(move |spec| spec.is_selected(model))
}

/// Looks up a row by name
pub fn find(name: &str) -> Option<&'static ArtifactSpec> {
    ARTIFACTS.iter().find(|spec| spec.name == name)
}

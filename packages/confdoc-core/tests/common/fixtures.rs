//! Go source tree fixtures

use std::fs;
use std::path::Path;
use tempfile::TempDir;

pub const MODULE: &str = "example.com/app";

/// A Go module on disk, removed when dropped
pub struct GoTree {
    dir: TempDir,
}

impl GoTree {
    /// Empty module with a `go.mod` declaring `example.com/app`
    pub fn new() -> Self {
        let dir = TempDir::new().expect("tempdir");
        fs::write(dir.path().join("go.mod"), format!("module {MODULE}\n\ngo 1.21\n"))
            .expect("write go.mod");
        Self { dir }
    }

    pub fn with_file(self, rel: &str, source: &str) -> Self {
        let path = self.dir.path().join(rel);
        fs::create_dir_all(path.parent().expect("parent")).expect("mkdir");
        fs::write(path, source).expect("write source");
        self
    }

    /// Tree with the `Section` capability declared in `internal/config`
    pub fn with_capability(self) -> Self {
        self.with_file("internal/config/section.go", fixture_capability())
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }
}

/// `Section` interface with `Key() string`
pub fn fixture_capability() -> &'static str {
    r#"package config

// Section is implemented by every configuration section.
type Section interface {
	Key() string
}
"#
}

/// `Conf{ Count int }` with a required, exampled `count` field
pub fn fixture_count_conf() -> &'static str {
    r#"package engine

// Conf configures the engine.
// +desc=Engine configuration
type Conf struct {
	// Number of workers.
	Count int `yaml:"count" conf:"required,example=3"`
}

func (c Conf) Key() string {
	return "engine"
}
"#
}

/// `Outer{ Inner []Inner }` where `Inner` has two fields
pub fn fixture_outer_inner() -> &'static str {
    r#"package pool

type Outer struct {
	// Pools to start.
	Inner []Inner `yaml:"inner"`
}

type Inner struct {
	Name string `yaml:"name" conf:",example=\"main\""`
	Size int    `yaml:"size"`
}

func (o *Outer) Key() string { return "pool" }
"#
}

// src/constants.rs

/// The word every formula command starts with (`rit test unit`).
pub const CMD_USE: &str = "rit";

/// The reserved subdirectory that marks a directory as a formula.
pub const SRC_DIR: &str = "src";

/// The reserved subdirectory holding a formula's build output.
pub const BIN_DIR: &str = "bin";

/// The reserved subdirectory holding a formula's documentation.
pub const DOCS_DIR: &str = "docs";

/// The name of the derived command index written at a workspace root.
pub const TREE_FILENAME: &str = "tree.json";

/// The optional per-command help file read by the tree generator.
pub const HELP_FILENAME: &str = "help.json";

/// The name of the tool's home directory inside the user's home (`~/.rit`).
pub const RIT_HOME_DIRNAME: &str = ".rit";

/// Environment variable overriding the tool's home directory.
pub const RIT_HOME_ENV: &str = "RIT_HOME";

/// The name of the workspace registry file (inside the tool home).
pub const WORKSPACES_FILENAME: &str = "formula_workspaces.json";

/// The directory holding local mirrors of synchronized workspaces (inside the tool home).
pub const REPOS_DIRNAME: &str = "repos";

/// The name of the workspace that always exists.
pub const DEFAULT_WORKSPACE_NAME: &str = "Default";

/// The directory (inside the user's home) of the default workspace.
pub const DEFAULT_WORKSPACE_DIRNAME: &str = "ritchie-formulas-local";

/// Prefix of the local mirror directory name of a workspace (`local-<name>`).
pub const LOCAL_REPO_PREFIX: &str = "local-";

/// Version tag written into every generated command tree.
pub const TREE_VERSION: &str = "v2";

/// Id of the implicit root node every top-level command points to.
pub const TREE_ROOT_ID: &str = "root";

//! Module specifiers for generated `import` statements.
//!
//! Paths are compared lexically; nothing here touches the filesystem.

use std::path::{Component, Path, PathBuf};

/// Drop `.` components and fold `..` into the preceding component.
pub fn normalize(path: &Path) -> PathBuf {
    let mut parts: Vec<Component<'_>> = Vec::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match parts.last() {
                Some(Component::Normal(_)) => {
                    parts.pop();
                }
                Some(Component::RootDir | Component::Prefix(_)) => {}
                _ => parts.push(component),
            },
            _ => parts.push(component),
        }
    }
    parts.iter().collect()
}

/// The path of `to` relative to the directory `from`.
pub fn relative(from: &Path, to: &Path) -> PathBuf {
    let from = normalize(from);
    let to = normalize(to);
    let from: Vec<_> = from.components().collect();
    let to: Vec<_> = to.components().collect();

    let common = from.iter().zip(&to).take_while(|(a, b)| a == b).count();
    let mut out = PathBuf::new();
    for _ in common..from.len() {
        out.push("..");
    }
    for component in &to[common..] {
        out.push(component);
    }
    out
}

/// Turn a relative path into an import specifier: forward slashes, a
/// leading `./` unless the path climbs with `../`, and anything under
/// `node_modules/` imported by package name.
pub fn module_specifier(relative: &Path) -> String {
    let mut converted = relative.to_string_lossy().replace('\\', "/");
    while converted.contains("//") {
        converted = converted.replace("//", "/");
    }
    if let Some(idx) = converted.rfind("/node_modules/") {
        return converted[idx + "/node_modules/".len()..].to_string();
    }
    if let Some(package) = converted.strip_prefix("node_modules/") {
        return package.to_string();
    }
    if converted.starts_with("../") || converted == ".." {
        return converted;
    }
    if converted.is_empty() || converted == "." {
        return ".".to_string();
    }
    format!("./{converted}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalizes_dots() {
        assert_eq!(normalize(Path::new("/a/./b/../c")), PathBuf::from("/a/c"));
        assert_eq!(normalize(Path::new("../x/./y")), PathBuf::from("../x/y"));
        assert_eq!(normalize(Path::new("/..")), PathBuf::from("/"));
    }

    #[test]
    fn relative_paths() {
        assert_eq!(
            relative(Path::new("/app/prisma/zod"), Path::new("/app/prisma/zod-utils")),
            PathBuf::from("../zod-utils")
        );
        assert_eq!(
            relative(Path::new("/app/src/zod"), Path::new("/app/src/zod/helpers")),
            PathBuf::from("helpers")
        );
        assert_eq!(relative(Path::new("/app"), Path::new("/app")), PathBuf::new());
    }

    #[test]
    fn specifiers() {
        assert_eq!(module_specifier(Path::new("../zod-utils")), "../zod-utils");
        assert_eq!(module_specifier(Path::new("helpers")), "./helpers");
        assert_eq!(
            module_specifier(Path::new("../../node_modules/.prisma/client")),
            ".prisma/client"
        );
        assert_eq!(module_specifier(Path::new("node_modules/@prisma/client")), "@prisma/client");
        assert_eq!(module_specifier(Path::new("")), ".");
    }
}

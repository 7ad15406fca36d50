use once_cell::sync::Lazy;
use std::collections::HashMap;
use std::path::Path;

// Exact (lower-cased) file names that carry no useful extension.
static FILENAME_LANGUAGES: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([
        ("dockerfile", "dockerfile"),
        ("gemfile", "ruby"),
        ("go.mod", "go"),
        ("go.sum", "text"),
        ("makefile", "makefile"),
        ("vagrantfile", "ruby"),
    ])
});

// Keys include the leading dot and are lower-case.
static EXTENSION_LANGUAGES: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([
        (".ada", "ada"),
        (".as", "actionscript"),
        (".bat", "batch"),
        (".bash", "bash"),
        (".c", "c"),
        (".h", "c"),
        (".clj", "clojure"),
        (".coffee", "coffeescript"),
        (".conf", "ini"),
        (".cpp", "cpp"),
        (".hpp", "cpp"),
        (".cxx", "cpp"),
        (".cs", "csharp"),
        (".css", "css"),
        (".csv", "csv"),
        (".d", "d"),
        (".dart", "dart"),
        (".diff", "diff"),
        (".elm", "elm"),
        (".erl", "erlang"),
        (".ex", "elixir"),
        (".exs", "elixir"),
        (".f90", "fortran"),
        (".fs", "fsharp"),
        (".go", "go"),
        (".groovy", "groovy"),
        (".hcl", "hcl"),
        (".hs", "haskell"),
        (".html", "html"),
        (".ini", "ini"),
        (".java", "java"),
        (".jl", "julia"),
        (".js", "javascript"),
        (".mjs", "javascript"),
        (".json", "json"),
        (".jsx", "jsx"),
        (".kt", "kotlin"),
        (".kts", "kotlin"),
        (".less", "less"),
        (".lisp", "lisp"),
        (".lua", "lua"),
        (".m", "objectivec"),
        (".md", "markdown"),
        (".mk", "makefile"),
        (".ml", "ocaml"),
        (".patch", "diff"),
        (".perl", "perl"),
        (".pl", "perl"),
        (".php", "php"),
        (".phtml", "php"),
        (".properties", "properties"),
        (".proto", "protobuf"),
        (".ps1", "powershell"),
        (".py", "python"),
        (".r", "r"),
        (".rb", "ruby"),
        (".rs", "rust"),
        (".sass", "sass"),
        (".scala", "scala"),
        (".scm", "scheme"),
        (".scss", "scss"),
        (".sh", "shell"),
        (".sql", "sql"),
        (".svelte", "svelte"),
        (".swift", "swift"),
        (".tcl", "tcl"),
        (".tex", "latex"),
        (".tf", "terraform"),
        (".toml", "toml"),
        (".ts", "typescript"),
        (".tsx", "tsx"),
        (".vb", "vbnet"),
        (".vbs", "vbscript"),
        (".vue", "vue"),
        (".xml", "xml"),
        (".xsd", "xml"),
        (".xsl", "xml"),
        (".yaml", "yaml"),
        (".yml", "yaml"),
        (".zig", "zig"),
        (".zsh", "zsh"),
    ])
});

/// Fence language tag for `path`.
///
/// Known file names win, then known extensions. Anything else falls back to
/// the bare extension (empty when the name has no dot at all).
pub fn detect_language(path: &Path) -> String {
    let filename = path
        .file_name()
        .map(|n| n.to_string_lossy().to_lowercase())
        .unwrap_or_default();

    if let Some(lang) = FILENAME_LANGUAGES.get(filename.as_str()) {
        return (*lang).to_string();
    }

    let extension = extension_of(&filename);
    if let Some(lang) = EXTENSION_LANGUAGES.get(extension) {
        return (*lang).to_string();
    }
    extension.trim_start_matches('.').to_string()
}

// Substring from the last dot, inclusive. A leading-dot name such as
// `.bashrc` is all extension.
fn extension_of(filename: &str) -> &str {
    filename.rfind('.').map_or("", |idx| &filename[idx..])
}

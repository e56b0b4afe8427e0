use crate::bundler::CONFIG_FILE_NAME;

/// Content semantics implied by a file name.
/// 由檔名推斷的內容類型。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FileKind {
    TypeScript,
    Tsx,
    JavaScript,
    Jsx,
    Json,
    Css,
    Configuration,
    Other,
}

impl FileKind {
    /// Script sources the bundler compiles.
    /// 打包器會編譯的腳本來源。
    pub fn is_script(self) -> bool {
        matches!(
            self,
            FileKind::TypeScript | FileKind::Tsx | FileKind::JavaScript | FileKind::Jsx
        )
    }

    /// Whether another source file may import a file of this kind.
    /// 是否可被其他來源檔匯入。
    pub fn is_module(self) -> bool {
        self.is_script() || self == FileKind::Json
    }

    /// Preference among same-stem files for an extension-less import; `None` when not importable.
    /// 無副檔名匯入時同名檔案的優先順序；不可匯入者回傳 `None`。
    pub fn resolution_rank(self) -> Option<u8> {
        match self {
            FileKind::TypeScript => Some(0),
            FileKind::Tsx => Some(1),
            FileKind::JavaScript => Some(2),
            FileKind::Jsx => Some(3),
            FileKind::Json => Some(4),
            FileKind::Css | FileKind::Configuration | FileKind::Other => None,
        }
    }
}

/// Classifies a file name by its extension. The reserved configuration name wins.
/// 依副檔名分類；保留的設定檔名稱優先。
pub fn classify(name: &str) -> FileKind {
    if name == CONFIG_FILE_NAME {
        return FileKind::Configuration;
    }
    let Some((_, ext)) = name.rsplit_once('.') else {
        return FileKind::Other;
    };
    match normalize_extension(ext).as_str() {
        "ts" | "mts" | "cts" => FileKind::TypeScript,
        "tsx" => FileKind::Tsx,
        "js" | "mjs" | "cjs" => FileKind::JavaScript,
        "jsx" => FileKind::Jsx,
        "json" => FileKind::Json,
        "css" => FileKind::Css,
        _ => FileKind::Other,
    }
}

fn normalize_extension(raw: &str) -> String {
    raw.trim_start_matches('.').to_ascii_lowercase()
}

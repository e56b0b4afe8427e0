use bundlepad_settings::{BundlerConfig, JsxMode, OutputFormat, CONFIG_FILE_NAME};

use crate::project::Project;
use crate::record::{validate_name, FileRecord};
use crate::store::ProjectError;

const PLAYGROUND_ENTRY: &str = "console.log('Hello, world!')";

const PLAYGROUND_CONFIG: &str = r#"{
  "format": "cjs",
  "cdnUrl": "https://cdn.skypack.dev",
  "minify": true
}"#;

const REACT_ENTRY: &str = r#"import { createRoot } from "react-dom/client"
import { App } from "./App"

createRoot(document.getElementById("root")!).render(<App />)
"#;

const REACT_APP: &str = r#"export const App = () => <h1>Hello, world!</h1>
"#;

const REACT_CONFIG: &str = r#"{
  "format": "esm",
  "cdnUrl": "https://esm.sh",
  "minify": false,
  "jsx": "automatic",
  "jsxImportSource": "react"
}"#;

/// Built-in starting points for a fresh session.
/// 內建的專案樣板。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TemplatePreset {
    #[default]
    TypeScript,
    React,
}

/// Bootstrapping definition of a project: seed source files plus configuration.
/// 專案的初始定義：來源檔與設定。
///
/// The configuration file is always placed after the seed files.
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectTemplate {
    files: Vec<FileRecord>,
    config: BundlerConfig,
    config_content: String,
}

impl ProjectTemplate {
    /// Starts a template whose configuration file holds `config` pretty-printed.
    /// 以指定設定建立樣板，設定檔內容為格式化後的 JSON。
    pub fn new(config: BundlerConfig) -> Result<Self, ProjectError> {
        config.validate()?;
        let config_content = config.to_pretty_json()?;
        Ok(Self {
            files: Vec::new(),
            config,
            config_content,
        })
    }

    /// Appends a seed source file.
    /// 加入一個初始來源檔。
    pub fn with_file(
        mut self,
        name: impl Into<String>,
        content: impl Into<String>,
    ) -> Result<Self, ProjectError> {
        let name = name.into();
        validate_name(&name)?;
        if name == CONFIG_FILE_NAME {
            return Err(ProjectError::ReservedNameViolation(name));
        }
        if self.files.iter().any(|file| file.name() == name) {
            return Err(ProjectError::AlreadyExists(name));
        }
        self.files.push(FileRecord::new(name, content));
        Ok(self)
    }

    /// Built-in template for `preset`.
    /// 取得內建預設樣板。
    pub fn preset(preset: TemplatePreset) -> Self {
        match preset {
            TemplatePreset::TypeScript => Self::typescript(),
            TemplatePreset::React => Self::react(),
        }
    }

    /// `index.ts` plus a CommonJS, minified, CDN-backed configuration.
    /// `index.ts` 搭配 CommonJS、壓縮與 CDN 設定。
    pub fn typescript() -> Self {
        Self {
            files: vec![FileRecord::new("index.ts", PLAYGROUND_ENTRY)],
            config: BundlerConfig::playground_default(),
            config_content: PLAYGROUND_CONFIG.to_string(),
        }
    }

    /// A `.tsx` entry and component using the automatic JSX runtime.
    /// 使用自動 JSX 執行環境的 `.tsx` 進入點與元件。
    pub fn react() -> Self {
        Self {
            files: vec![
                FileRecord::new("index.tsx", REACT_ENTRY),
                FileRecord::new("App.tsx", REACT_APP),
            ],
            config: BundlerConfig {
                format: Some(OutputFormat::Esm),
                minify: Some(false),
                cdn_url: Some("https://esm.sh".to_string()),
                jsx: Some(JsxMode::Automatic),
                jsx_import_source: Some("react".to_string()),
                ..BundlerConfig::default()
            },
            config_content: REACT_CONFIG.to_string(),
        }
    }

    /// Parsed form of the seeded configuration.
    /// 樣板設定的解析結果。
    pub fn config(&self) -> &BundlerConfig {
        &self.config
    }

    /// Names the instantiated project will list, in order.
    pub fn file_names(&self) -> Vec<&str> {
        self.files
            .iter()
            .map(FileRecord::name)
            .chain(std::iter::once(CONFIG_FILE_NAME))
            .collect()
    }

    pub(crate) fn instantiate(&self) -> Project {
        let mut files = self.files.clone();
        files.push(FileRecord::new(CONFIG_FILE_NAME, self.config_content.clone()));
        Project::from_parts(files, self.config.clone())
    }
}

impl Default for ProjectTemplate {
    fn default() -> Self {
        Self::typescript()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_config_text_matches_typed_config() {
        for preset in [TemplatePreset::TypeScript, TemplatePreset::React] {
            let template = ProjectTemplate::preset(preset);
            let parsed = BundlerConfig::parse(&template.config_content).unwrap();
            assert_eq!(&parsed, template.config(), "{preset:?}");
        }
    }

    #[test]
    fn config_file_is_listed_last() {
        let template = ProjectTemplate::new(BundlerConfig::default())
            .unwrap()
            .with_file("main.ts", "")
            .unwrap()
            .with_file("util.ts", "")
            .unwrap();
        assert_eq!(
            template.file_names(),
            vec!["main.ts", "util.ts", CONFIG_FILE_NAME]
        );
        let project = template.instantiate();
        assert_eq!(project.names(), template.file_names());
        assert_eq!(project.get(CONFIG_FILE_NAME).unwrap().content(), "{}");
    }

    #[test]
    fn with_file_rejects_reserved_and_duplicate_names() {
        let template = ProjectTemplate::new(BundlerConfig::default()).unwrap();
        assert!(matches!(
            template.clone().with_file(CONFIG_FILE_NAME, "{}"),
            Err(ProjectError::ReservedNameViolation(_))
        ));
        let template = template.with_file("a.ts", "").unwrap();
        assert!(matches!(
            template.with_file("a.ts", "again"),
            Err(ProjectError::AlreadyExists(_))
        ));
    }

    #[test]
    fn new_rejects_invalid_config() {
        let config = BundlerConfig {
            cdn_url: Some("not a url".into()),
            ..BundlerConfig::default()
        };
        assert!(matches!(
            ProjectTemplate::new(config),
            Err(ProjectError::InvalidConfiguration(_))
        ));
    }
}

use once_cell::sync::Lazy;
use std::collections::HashMap;

use crate::models::dictionary::{Definition, DefinitionEntry};

/// 常见技术词汇：小写词 -> (规范写法, 词性, 中文释义)
static TECH_TERMS: Lazy<HashMap<&'static str, (&'static str, &'static str, &'static str)>> =
    Lazy::new(|| {
        HashMap::from([
            ("javascript", ("JavaScript", "noun", "一种广泛使用的编程语言，主要用于网页开发")),
            ("html", ("HTML", "noun", "超文本标记语言，用于创建网页的标准标记语言")),
            ("css", ("CSS", "noun", "层叠样式表，用于描述网页样式的样式表语言")),
            ("python", ("Python", "noun", "一种高级编程语言，以其简洁和可读性著称")),
            ("react", ("React", "noun", "用于构建用户界面的JavaScript库")),
            ("vue", ("Vue", "noun", "渐进式JavaScript框架")),
            ("angular", ("Angular", "noun", "基于TypeScript构建的Web应用框架")),
            ("nodejs", ("Node.js", "noun", "基于Chrome V8引擎的JavaScript运行环境")),
            ("typescript", ("TypeScript", "noun", "JavaScript的超集，添加了类型系统")),
            ("github", ("GitHub", "noun", "基于Git的代码托管平台")),
            ("api", ("API", "noun", "应用程序编程接口")),
            ("json", ("JSON", "noun", "JavaScript对象表示法，轻量级数据交换格式")),
            ("sql", ("SQL", "noun", "结构化查询语言，用于管理关系型数据库")),
            ("ai", ("AI", "noun", "人工智能")),
            ("ml", ("ML", "noun", "机器学习")),
            ("ui", ("UI", "noun", "用户界面")),
            ("ux", ("UX", "noun", "用户体验")),
        ])
    });

/// 所有词典都查不到时生成的兜底释义
pub fn synthesize(word: &str) -> Definition {
    let (display, pos, meaning) = match TECH_TERMS.get(word.to_lowercase().as_str()) {
        Some(&(display, pos, meaning)) => (display.to_string(), pos, meaning.to_string()),
        None => (
            word.to_string(),
            "noun",
            format!("'{}' - 词典中暂无此词条的详细释义", word),
        ),
    };

    Definition {
        word: display,
        pronunciation: String::new(),
        definitions: vec![DefinitionEntry {
            part_of_speech: pos.to_string(),
            meaning,
            example: String::new(),
        }],
        examples: Vec::new(),
        pos_tags: pos.to_string(),
    }
}

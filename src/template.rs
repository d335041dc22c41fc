//! 文件列表页面模板。

const FILES_TEMPLATE_HEAD: &str = r#"<!DOCTYPE html>
<html>
<head>
    <title>List of Files</title>
</head>
<body>
    <h1>List of Files in the Folder</h1>
    <ul>
"#;

const FILES_TEMPLATE_TAIL: &str = r#"    </ul>
</body>
<style>
h1 {
    text-align: center;
    margin: 30px 0;
    color: #ff8800;
}
</style>
</html>"#;

/// 渲染文件列表，每个路径一个 `<li>`。
pub fn render_file_list(files: &[String]) -> String {
    let mut html = String::from(FILES_TEMPLATE_HEAD);
    for file in files {
        html.push_str("        <li>");
        html.push_str(&html_escape(file));
        html.push_str("</li>\n");
    }
    html.push_str(FILES_TEMPLATE_TAIL);
    html
}

fn html_escape(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&#34;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

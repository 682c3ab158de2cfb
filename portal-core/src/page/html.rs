//! 把 `PageView` 渲染成 HTML。页面不依赖任何客户端脚本，
//! 所有按钮都是提交到 `/page/*` 的普通表单。

use super::view::{FooterView, FormField, ListItemView, PageView, Panel};

const HEAD: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>Wi-Fi Setup</title>
    <link rel="stylesheet" href="/style.css">
</head>
<body>
<main class="container">
"#;

const TAIL: &str = "</body>\n</html>\n";

/// 对文本和属性值做 HTML 转义
pub fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

fn hidden_unless(visible: bool) -> &'static str {
    if visible { "" } else { " hidden" }
}

/// 按钮提交的是列表下标，同名网络也能区分开
fn render_list_item(out: &mut String, index: usize, item: &ListItemView) {
    out.push_str(&format!(
        concat!(
            "        <li class=\"list-item\">\n",
            "          <button class=\"btn-list-item\" type=\"submit\" name=\"item\" value=\"{index}\" data-ssid=\"{data}\">\n",
            "            <span class=\"list-item-ssid\">{ssid}</span>\n",
            "            <span class=\"list-item-rssi\" data-level=\"{level}\"></span>\n",
            "            <span class=\"list-item-secure{secure}\" title=\"Secure\">&#128274;</span>\n",
            "            <span class=\"list-item-not-secure{not_secure}\" title=\"Not secure\">&#128275;</span>\n",
            "          </button>\n",
            "        </li>\n",
        ),
        index = index,
        data = escape(&item.data_ssid),
        ssid = escape(&item.ssid),
        level = item.signal_level,
        secure = hidden_unless(item.show_secure),
        not_secure = hidden_unless(item.show_not_secure),
    ));
}

fn render_footer_item(out: &mut String, footer: &FooterView) {
    out.push_str(&format!(
        "  <p class=\"footer-text\">&copy; <span class=\"footer-year\">{}</span> Wi-Fi Setup</p>\n",
        footer.year
    ));
}

/// 渲染整页
pub fn render_page(view: &PageView) -> String {
    let mut out = String::from(HEAD);

    out.push_str(&format!(
        concat!(
            "  <section id=\"networksHero\" class=\"panel{}\">\n",
            "    <h1>Connect this device to Wi-Fi</h1>\n",
            "    <p>Search for nearby wireless networks to get started.</p>\n",
            "    <form method=\"post\" action=\"/page/scan\">\n",
            "      <button id=\"btnScan\" type=\"submit\">Scan networks</button>\n",
            "    </form>\n",
            "  </section>\n",
            "  <section id=\"networksLoader\" class=\"panel loader{}\">\n",
            "    <div class=\"spinner\"></div>\n",
            "    <p>Searching for networks&hellip;</p>\n",
            "  </section>\n",
            "  <section id=\"networksFounded\" class=\"panel{}\">\n",
            "    <header>\n",
            "      <h2>Networks found</h2>\n",
            "      <form method=\"post\" action=\"/page/refresh\">\n",
            "        <button id=\"btnRefresh\" type=\"submit\">Refresh</button>\n",
            "      </form>\n",
            "    </header>\n",
            "    <form method=\"post\" action=\"/page/select\">\n",
            "      <ul id=\"list\">\n",
        ),
        hidden_unless(view.panel == Panel::Hero),
        hidden_unless(view.panel == Panel::Loading),
        hidden_unless(view.panel == Panel::Found),
    ));

    for (index, item) in view.list.iter().enumerate() {
        render_list_item(&mut out, index, item);
    }

    let autofocus = |field| {
        if view.form.focus == Some(field) { " autofocus" } else { "" }
    };
    // 密码从不回显到页面里
    out.push_str(&format!(
        concat!(
            "      </ul>\n",
            "    </form>\n",
            "  </section>\n",
            "  <form id=\"form\" method=\"post\" action=\"/page/submit\">\n",
            "    <label for=\"ssidInput\">Network name (SSID)</label>\n",
            "    <input id=\"ssidInput\" name=\"ssid\" type=\"text\" value=\"{}\"{}>\n",
            "    <label for=\"passwordInput\">Password</label>\n",
            "    <input id=\"passwordInput\" name=\"password\" type=\"password\" value=\"\"{}>\n",
            "    <button id=\"btnSubmit\" type=\"submit\">Save</button>\n",
            "  </form>\n",
            "</main>\n",
            "<footer id=\"footer\">\n",
        ),
        escape(&view.form.ssid),
        autofocus(FormField::Ssid),
        autofocus(FormField::Password),
    ));

    for footer in &view.footer {
        render_footer_item(&mut out, footer);
    }
    out.push_str("</footer>\n");
    out.push_str(TAIL);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::structs::Network;

    #[test]
    fn escapes_markup_in_ssid() {
        assert_eq!(escape(r#"<b>"Tom's" & co</b>"#), "&lt;b&gt;&quot;Tom&#39;s&quot; &amp; co&lt;/b&gt;");
    }

    #[test]
    fn only_the_active_panel_is_visible() {
        let view = PageView {
            panel: Panel::Loading,
            ..PageView::default()
        };
        let html = render_page(&view);
        assert!(html.contains(r#"id="networksHero" class="panel hidden""#));
        assert!(html.contains(r#"id="networksLoader" class="panel loader""#));
        assert!(html.contains(r#"id="networksFounded" class="panel hidden""#));
    }

    #[test]
    fn list_item_carries_ssid_level_and_indicators() {
        let view = PageView {
            panel: Panel::Found,
            list: vec![ListItemView::from_network(&Network {
                ssid: "Cafe & Bar".into(),
                rssi: -75,
                secure: false,
            })],
            ..PageView::default()
        };
        let html = render_page(&view);
        assert!(html.contains(r#"name="item" value="0" data-ssid="Cafe &amp; Bar""#));
        assert!(html.contains(r#"<span class="list-item-ssid">Cafe &amp; Bar</span>"#));
        assert!(html.contains(r#"data-level="1""#));
        assert!(html.contains(r#"class="list-item-secure hidden""#));
        assert!(html.contains(r#"class="list-item-not-secure""#));
    }

    #[test]
    fn focused_field_gets_autofocus() {
        let mut view = PageView::default();
        view.form.ssid = "Home".into();
        view.form.focus = Some(FormField::Password);
        let html = render_page(&view);
        assert!(html.contains(r#"id="ssidInput" name="ssid" type="text" value="Home">"#));
        assert!(html.contains(r#"type="password" value="" autofocus>"#));
    }

    #[test]
    fn password_is_never_rendered() {
        let mut view = PageView::default();
        view.form.ssid = "Home".into();
        view.form.password = "hunter2".into();
        let html = render_page(&view);
        assert!(!html.contains("hunter2"));
        assert!(html.contains(r#"id="passwordInput" name="password" type="password" value="">"#));
    }

    #[test]
    fn footer_shows_year() {
        let view = PageView {
            footer: vec![FooterView { year: 2031 }],
            ..PageView::default()
        };
        assert!(render_page(&view).contains(r#"<span class="footer-year">2031</span>"#));
    }
}

// Stylesheets for the built-in layouts. Exported as styles.css, or inlined
// into previews.

pub const MODERN_CSS: &str = r#"* { box-sizing: border-box; }
body.modern { margin: 0; font-family: "Inter", "Segoe UI", Roboto, sans-serif; color: #1f2933; background: #f5f7fa; line-height: 1.55; }
.banner { background: linear-gradient(135deg, #1e3a8a, #2563eb); color: #fff; padding: 48px 8vw 36px; }
.banner h1 { margin: 0; font-size: 2.6rem; letter-spacing: -0.02em; }
.banner .title { margin: 6px 0 0; font-size: 1.2rem; opacity: 0.9; }
.banner .contacts { margin: 14px 0 0; font-size: 0.95rem; opacity: 0.85; }
.columns { display: grid; grid-template-columns: 260px 1fr; gap: 32px; padding: 32px 8vw 64px; }
.sidebar section, main section { background: #fff; border-radius: 10px; padding: 20px 24px; margin-bottom: 20px; box-shadow: 0 1px 3px rgba(15, 23, 42, 0.08); }
h2 { margin: 0 0 12px; font-size: 1rem; text-transform: uppercase; letter-spacing: 0.08em; color: #1e3a8a; }
h3 { margin: 0; font-size: 1.05rem; }
.at { font-weight: 400; color: #52606d; }
.meta { margin: 2px 0 8px; color: #7b8794; font-size: 0.9rem; }
.entry + .entry { margin-top: 18px; padding-top: 18px; border-top: 1px solid #e4e7eb; }
.sidebar ul { margin: 0; padding-left: 18px; }
ul.tags { list-style: none; padding: 0; display: flex; flex-wrap: wrap; gap: 6px; }
ul.tags li { background: #e0e7ff; color: #1e3a8a; border-radius: 999px; padding: 2px 10px; font-size: 0.85rem; }
@media (max-width: 760px) { .columns { grid-template-columns: 1fr; } }
@media print { body.modern { background: #fff; } .sidebar section, main section { box-shadow: none; } }
"#;

pub const CLASSIC_CSS: &str = r#"body.classic { margin: 0; background: #fff; color: #111; font-family: Georgia, "Times New Roman", serif; line-height: 1.5; }
.page { max-width: 820px; margin: 0 auto; padding: 48px 40px; }
header { text-align: center; margin-bottom: 24px; }
header h1 { margin: 0; font-size: 2.2rem; font-variant: small-caps; letter-spacing: 0.04em; }
header .title { margin: 4px 0; font-style: italic; }
header .contacts { margin: 8px 0 0; font-size: 0.9rem; }
h2 { margin: 24px 0 0; font-size: 1.1rem; text-transform: uppercase; letter-spacing: 0.1em; }
hr { border: 0; border-top: 1px solid #111; margin: 4px 0 12px; }
.entry { margin-bottom: 14px; }
.row { display: flex; justify-content: space-between; gap: 16px; }
dl { display: grid; grid-template-columns: 140px 1fr; gap: 4px 12px; margin: 0; }
dt { font-weight: bold; }
dd { margin: 0; }
@media print { .page { padding: 0; } }
"#;

pub const MINIMAL_CSS: &str = r#"body.minimal { max-width: 680px; margin: 40px auto; padding: 0 20px; font-family: ui-monospace, "SF Mono", Menlo, monospace; color: #222; line-height: 1.6; }
h1 { font-size: 1.6rem; margin-bottom: 0; }
h2 { font-size: 1rem; margin-top: 28px; border-bottom: 1px dashed #aaa; }
.contact { display: inline-block; margin-right: 12px; color: #555; }
.summary { margin-top: 16px; }
ul { padding-left: 18px; }
"#;

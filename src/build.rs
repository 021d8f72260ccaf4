//! Site building orchestration.
//!
//! Coordinates loading, rendering and static asset copying.
//!
//! # Architecture
//!
//! ```text
//! generate()
//!     │
//!     ├── rayon::join ─┬── load_layouts() ─┐
//!     │                └── load_pages()  ──┴── render_site()
//!     │                                          │
//!     │                                          ├── resolve: every page → its layout
//!     │                                          └── write:   <output>/<page>.html (parallel)
//!     │
//!     └── copy_static_assets() ──► <output>/static/**   (runs alongside everything above)
//! ```
//!
//! Both load phases finish before any page renders. Layout references are
//! all checked before the first page file is written, so a missing layout
//! leaves no rendered pages behind. Write and copy failures are not rolled
//! back.

use crate::{
    compiler::{
        Layout, Layouts, Page, Pages, copy_static_assets,
        error::{BuildError, Result},
        load_layouts, load_pages,
    },
    config::BuildConfig,
    log,
};
use rayon::prelude::*;
use std::{fs, path::Path};

/// Item counts from a successful build.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BuildSummary {
    pub layouts: usize,
    pub pages: usize,
    pub assets: usize,
}

/// Build the entire site.
///
/// Static assets are copied concurrently with the load → render chain.
/// When both branches fail, the render-branch error is returned.
pub fn generate(build: &BuildConfig) -> Result<BuildSummary> {
    if build.clean {
        clean_output(&build.output)?;
    }

    let (site_result, assets_result) = rayon::join(
        || -> Result<(usize, usize)> {
            let (layouts, pages) =
                rayon::join(|| load_layouts(&build.layouts), || load_pages(&build.pages));
            let (layouts, pages) = (layouts?, pages?);
            let written = render_site(&layouts, &pages, &build.output)?;
            Ok((layouts.len(), written))
        },
        || copy_static_assets(&build.static_dir, &build.output),
    );

    let (layouts, pages) = site_result?;
    let assets = assets_result?;

    Ok(BuildSummary {
        layouts,
        pages,
        assets,
    })
}

/// Render every page into its layout and write `<output>/<page>.html`.
///
/// Returns the number of pages written.
pub fn render_site(layouts: &Layouts, pages: &Pages, output: &Path) -> Result<usize> {
    let planned = resolve_layouts(layouts, pages)?;

    fs::create_dir_all(output).map_err(|err| BuildError::Io(output.to_path_buf(), err))?;

    planned
        .par_iter()
        .try_for_each(|(page, layout)| write_page(page, layout, output))?;

    log!("render"; "wrote {} pages", planned.len());
    Ok(planned.len())
}

/// Pair each page with its layout, or fail on the first page (by name)
/// whose layout is not loaded. Other offenders are logged.
fn resolve_layouts<'a>(
    layouts: &'a Layouts,
    pages: &'a Pages,
) -> Result<Vec<(&'a Page, &'a Layout)>> {
    let mut planned = Vec::with_capacity(pages.len());
    let mut missing = Vec::new();

    for (name, page) in pages {
        match layouts.get(page.layout()) {
            Some(layout) => planned.push((page, layout)),
            None => missing.push(BuildError::MissingLayout {
                page: name.clone(),
                layout: page.layout().to_owned(),
            }),
        }
    }

    let mut missing = missing.into_iter();
    match missing.next() {
        None => Ok(planned),
        Some(first) => {
            for err in missing {
                log!("error"; "{err}");
            }
            Err(first)
        }
    }
}

fn write_page(page: &Page, layout: &Layout, output: &Path) -> Result<()> {
    let dest = output.join(format!("{}.html", page.name()));
    let html = layout.render(page);
    fs::write(&dest, html).map_err(|err| BuildError::Io(dest, err))
}

/// Remove the output directory if it exists.
fn clean_output(output: &Path) -> Result<()> {
    if output.exists() {
        log!("build"; "cleaning {}", output.display());
        fs::remove_dir_all(output).map_err(|err| BuildError::Io(output.to_path_buf(), err))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use tempfile::TempDir;

    /// A site root with `layouts/`, `pages/`, `static/` and a `public/` output.
    struct Site {
        dir: TempDir,
    }

    impl Site {
        fn new() -> Self {
            let dir = TempDir::new().unwrap();
            for sub in ["layouts", "pages", "static"] {
                fs::create_dir(dir.path().join(sub)).unwrap();
            }
            Self { dir }
        }

        fn file(&self, rel: &str, content: &str) -> &Self {
            let path = self.dir.path().join(rel);
            fs::create_dir_all(path.parent().unwrap()).unwrap();
            fs::write(path, content).unwrap();
            self
        }

        fn config(&self) -> BuildConfig {
            let root = self.dir.path();
            BuildConfig {
                root: Some(root.to_path_buf()),
                layouts: root.join("layouts"),
                pages: root.join("pages"),
                output: root.join("public"),
                static_dir: root.join("static"),
                clean: false,
            }
        }

        fn output(&self, rel: &str) -> PathBuf {
            self.dir.path().join("public").join(rel)
        }

        fn read(&self, rel: &str) -> String {
            fs::read_to_string(self.output(rel)).unwrap()
        }
    }

    fn page(name: &str, layout: &str, body: &str) -> Page {
        Page::parse(name, &format!("+++\nlayout = \"{layout}\"\n+++\n{body}")).unwrap()
    }

    #[test]
    fn test_generate_renders_page_into_layout() {
        let site = Site::new();
        site.file("layouts/base.html", "<html>{{content}}</html>")
            .file("pages/home.md", "+++\nlayout = \"base\"\n+++\nHi");

        let summary = generate(&site.config()).unwrap();

        assert_eq!(
            summary,
            BuildSummary {
                layouts: 1,
                pages: 1,
                assets: 0
            }
        );
        assert_eq!(site.read("home.html"), "<html>Hi</html>");
    }

    #[test]
    fn test_generate_full_site() {
        let site = Site::new();
        site.file(
            "layouts/base.html",
            "<title>{{ title }}</title>\n<main>{{ content }}</main>\n",
        )
        .file("layouts/post.html", "<article data-by=\"{{author}}\">{{content}}</article>")
        .file(
            "pages/index.md",
            "+++\nlayout = \"base\"\ntitle = \"Home\"\n+++\n<p>welcome</p>",
        )
        .file(
            "pages/posts/first.md",
            "+++\nlayout = \"post\"\nauthor = \"Ada\"\n+++\nfirst",
        )
        .file("pages/about.md", "+++\nlayout = \"base\"\n+++\nabout")
        .file("static/css/site.css", "body{}");

        let summary = generate(&site.config()).unwrap();

        assert_eq!(summary.pages, 3);
        assert_eq!(summary.assets, 1);
        assert_eq!(
            site.read("index.html"),
            "<title>Home</title>\n<main><p>welcome</p></main>\n"
        );
        assert_eq!(site.read("about.html"), "<title></title>\n<main>about</main>\n");
        assert_eq!(
            site.read("first.html"),
            "<article data-by=\"Ada\">first</article>"
        );
        assert_eq!(site.read("static/css/site.css"), "body{}");
    }

    #[test]
    fn test_generate_missing_layout_names_page_and_layout() {
        let site = Site::new();
        site.file("layouts/base.html", "{{content}}")
            .file("pages/home.md", "+++\nlayout = \"base\"\n+++\nHi")
            .file("pages/orphan.md", "+++\nlayout = \"missing\"\n+++\nlost");

        let err = generate(&site.config()).unwrap_err();

        match &err {
            BuildError::MissingLayout { page, layout } => {
                assert_eq!(page, "orphan");
                assert_eq!(layout, "missing");
            }
            other => panic!("expected missing layout, got {other:?}"),
        }
        assert!(err.to_string().contains("orphan"));
        assert!(err.to_string().contains("missing"));
        assert!(!site.output("orphan.html").exists());
        // references are checked before anything is written
        assert!(!site.output("home.html").exists());
    }

    #[test]
    fn test_generate_parse_error_aborts_before_render() {
        let site = Site::new();
        site.file("layouts/base.html", "{{content}}")
            .file("pages/home.md", "+++\nlayout = \"base\"\n+++\nHi")
            .file("pages/broken.md", "no front matter");

        let err = generate(&site.config()).unwrap_err();

        assert!(matches!(err, BuildError::Parse { ref page, .. } if page == "broken"));
        assert!(!site.output("home.html").exists());
    }

    #[test]
    fn test_generate_missing_source_dir() {
        let site = Site::new();
        fs::remove_dir(site.dir.path().join("layouts")).unwrap();

        let err = generate(&site.config()).unwrap_err();
        assert!(matches!(err, BuildError::Walk(..)));
    }

    #[test]
    fn test_generate_is_idempotent() {
        let site = Site::new();
        site.file("layouts/base.html", "<h1>{{title}}</h1>{{content}}")
            .file("pages/a.md", "+++\nlayout = \"base\"\ntitle = \"A\"\n+++\naaa")
            .file("pages/b.md", "+++\nlayout = \"base\"\ntitle = \"B\"\n+++\nbbb")
            .file("static/img/logo.svg", "<svg/>");

        generate(&site.config()).unwrap();
        let first: Vec<Vec<u8>> = ["a.html", "b.html", "static/img/logo.svg"]
            .iter()
            .map(|rel| fs::read(site.output(rel)).unwrap())
            .collect();

        generate(&site.config()).unwrap();
        let second: Vec<Vec<u8>> = ["a.html", "b.html", "static/img/logo.svg"]
            .iter()
            .map(|rel| fs::read(site.output(rel)).unwrap())
            .collect();

        assert_eq!(first, second);
    }

    #[test]
    fn test_generate_clean_removes_stale_output() {
        let site = Site::new();
        site.file("layouts/base.html", "{{content}}")
            .file("pages/home.md", "+++\nlayout = \"base\"\n+++\nHi")
            .file("public/stale.html", "old");

        generate(&site.config()).unwrap();
        assert!(site.output("stale.html").exists());

        let mut config = site.config();
        config.clean = true;
        generate(&config).unwrap();

        assert!(!site.output("stale.html").exists());
        assert_eq!(site.read("home.html"), "Hi");
    }

    #[test]
    fn test_render_site_shared_layout_is_isolated() {
        let out = TempDir::new().unwrap();
        let mut layouts = Layouts::new();
        layouts.insert("base".into(), Layout::new("base", "[{{title}}] {{content}}"));

        let mut pages = Pages::new();
        pages.insert(
            "a".into(),
            Page::parse("a", "+++\nlayout = \"base\"\ntitle = \"Alpha\"\n+++\none").unwrap(),
        );
        pages.insert("b".into(), page("b", "base", "two"));

        let written = render_site(&layouts, &pages, out.path()).unwrap();

        assert_eq!(written, 2);
        assert_eq!(fs::read_to_string(out.path().join("a.html")).unwrap(), "[Alpha] one");
        assert_eq!(fs::read_to_string(out.path().join("b.html")).unwrap(), "[] two");
    }

    #[test]
    fn test_render_site_reports_first_missing_by_name() {
        let out = TempDir::new().unwrap();
        let layouts = Layouts::new();
        let mut pages = Pages::new();
        pages.insert("zeta".into(), page("zeta", "x", ""));
        pages.insert("alpha".into(), page("alpha", "y", ""));

        let err = render_site(&layouts, &pages, out.path()).unwrap_err();

        assert!(matches!(
            err,
            BuildError::MissingLayout { ref page, ref layout } if page == "alpha" && layout == "y"
        ));
    }

    #[test]
    fn test_render_site_no_pages() {
        let out = TempDir::new().unwrap();
        let target = out.path().join("public");

        let written = render_site(&Layouts::new(), &Pages::new(), &target).unwrap();

        assert_eq!(written, 0);
        assert!(target.is_dir());
    }

    #[test]
    fn test_render_site_write_failure_is_io_error() {
        let out = TempDir::new().unwrap();
        // a directory where the page file should go
        fs::create_dir(out.path().join("home.html")).unwrap();

        let mut layouts = Layouts::new();
        layouts.insert("base".into(), Layout::new("base", "{{content}}"));
        let mut pages = Pages::new();
        pages.insert("home".into(), page("home", "base", "Hi"));

        let err = render_site(&layouts, &pages, out.path()).unwrap_err();
        assert!(matches!(err, BuildError::Io(ref path, _) if path.ends_with("home.html")));
    }
}

//! Static landing sections: navigation, hero, feature grid, footer.

pub const STYLESHEET: &str = r##"<style>
:root{--primary:#3E1C00;--secondary:#E7E6E4;--text:#404040}
*{box-sizing:border-box}
body{margin:0;font-family:system-ui,-apple-system,"Segoe UI",sans-serif;color:var(--text);background:#fff}
a{color:inherit}
.wrap{max-width:72rem;margin:0 auto;padding:0 1.5rem}
.narrow{max-width:48rem;margin:0 auto;padding:0 1.5rem;text-align:center}
nav{position:sticky;top:0;z-index:50;background:rgba(231,230,228,.6);backdrop-filter:blur(8px);border-bottom:1px solid var(--secondary)}
nav .wrap{height:4rem;display:flex;align-items:center;justify-content:space-between;color:var(--primary)}
.brand{display:flex;align-items:center;gap:.5rem;font-weight:700}
.brand-mark{width:2rem;height:2rem;border-radius:.25rem;background:var(--primary)}
.nav-links{display:flex;gap:1.5rem;font-size:.875rem}
.hero{padding:6rem 0;text-align:center;background:radial-gradient(1200px 600px at 70% -10%,rgba(231,230,228,.25),transparent)}
.badge{display:inline-block;font-size:.875rem;padding:.25rem .75rem;border-radius:999px;background:var(--secondary);color:var(--primary)}
.hero h1{margin-top:1.5rem;font-size:3.5rem;font-weight:800;line-height:1.1;color:var(--primary)}
.hero p{font-size:1.25rem}
.cta{margin-top:2rem;display:flex;justify-content:center;gap:1rem}
.btn{display:inline-flex;align-items:center;gap:.5rem;padding:.75rem 1.25rem;border-radius:.5rem;font-weight:600;border:0;cursor:pointer;text-decoration:none;font-size:1rem}
.btn-primary{background:var(--primary);color:#fff}
.btn-secondary{background:var(--secondary);color:var(--primary)}
.btn-small{padding:.5rem .75rem;font-size:.875rem}
.btn[disabled]{opacity:.6;cursor:wait}
.features{padding:4rem 0}
.feature-grid{display:grid;grid-template-columns:repeat(auto-fit,minmax(18rem,1fr));gap:1.5rem}
.card{border:1px solid var(--secondary);border-radius:.75rem;padding:1.5rem;box-shadow:0 1px 2px rgba(0,0,0,.05)}
.card h3{margin:0;color:var(--primary)}
.get-started{padding:5rem 0}
.get-started h2{font-size:1.875rem;color:var(--primary)}
.widget{margin-top:2rem;display:grid;gap:1rem;text-align:left}
.widget textarea{width:100%;height:8rem;padding:1rem;border:1px solid var(--secondary);border-radius:.5rem;font:inherit}
.actions{display:flex;gap:.75rem;justify-content:center}
.actions form{margin:0}
.busy{text-align:center;font-size:.875rem}
.notice{padding:.75rem 1rem;border-radius:.5rem;background:#fdecea;color:#7a1c12}
.jobs-label{font-size:.875rem;font-weight:500;color:var(--primary)}
.job{border:1px solid var(--secondary);border-radius:.5rem;padding:1rem;display:flex;justify-content:space-between;align-items:flex-start;gap:.75rem}
.job-title{font-weight:600;color:var(--primary)}
.job-skills{font-size:.875rem}
.job-actions{display:flex;gap:.5rem;align-items:center}
.job-actions form{margin:0}
.selected{outline:2px solid var(--primary);outline-offset:2px}
.score{margin-top:1.5rem;padding:1rem;border-radius:.5rem;background:var(--secondary)}
.score-value{font-weight:600;color:var(--primary)}
.score-missing{font-size:.875rem;margin-top:.5rem}
footer{padding:2.5rem 0;background:var(--secondary);color:var(--primary);font-size:.875rem}
footer .wrap{display:flex;justify-content:space-between;align-items:center}
</style>
"##;

pub const NAV: &str = r##"<nav>
<div class="wrap">
<div class="brand"><div class="brand-mark"></div><span>CareerFlow</span></div>
<div class="nav-links"><a href="#features">Features</a><a href="#get-started">Get Started</a></div>
</div>
</nav>
"##;

pub const HERO: &str = r##"<section class="hero">
<div class="wrap">
<span class="badge">AI-powered Career Platform</span>
<h1>Land your next role faster</h1>
<p>Upload your resume, get tailored jobs, one‑click apply, practice interviews, and perfect your CV &amp; cover letter.</p>
<div class="cta">
<a href="#get-started" class="btn btn-primary">Get started</a>
<a href="#features" class="btn btn-secondary">Explore features</a>
</div>
</div>
</section>
"##;

/// (title, description) for each card, in display order.
pub const FEATURES: [(&str, &str); 6] = [
    (
        "Upload CV → Job Matches",
        "Drop your resume and instantly see roles that fit your skills.",
    ),
    (
        "One‑click Apply",
        "Apply to saved roles with your best profile in a single tap.",
    ),
    (
        "Mock Interviews",
        "Practice with curated questions by role and seniority.",
    ),
    (
        "CV Builder",
        "Craft a clean, ATS‑friendly resume with guided sections.",
    ),
    (
        "Cover Letter Writer",
        "Generate tailored letters in your preferred tone.",
    ),
    (
        "ATS Score Checker",
        "See your match score and missing keywords instantly.",
    ),
];

pub fn features() -> String {
    let mut html = String::with_capacity(2048);
    html.push_str("<section id=\"features\" class=\"features\">\n<div class=\"wrap feature-grid\">\n");
    for (title, description) in FEATURES {
        html.push_str("<div class=\"card\"><h3>");
        html.push_str(title);
        html.push_str("</h3><p>");
        html.push_str(description);
        html.push_str("</p></div>\n");
    }
    html.push_str("</div>\n</section>\n");
    html
}

pub fn footer(year: i32) -> String {
    format!(
        "<footer>\n<div class=\"wrap\">\n<span>© {year} CareerFlow</span>\n\
         <a href=\"#\">Privacy</a>\n</div>\n</footer>\n"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_features_render_in_order() {
        let html = features();
        let positions: Vec<usize> = FEATURES
            .iter()
            .map(|(title, _)| html.find(title).unwrap())
            .collect();
        assert!(positions.windows(2).all(|pair| pair[0] < pair[1]));
        assert_eq!(html.matches("class=\"card\"").count(), 6);
    }

    #[test]
    fn test_footer_has_privacy_link() {
        let html = footer(2030);
        assert!(html.contains("© 2030 CareerFlow"));
        assert!(html.contains(">Privacy</a>"));
    }
}

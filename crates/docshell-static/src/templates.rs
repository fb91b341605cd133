//! Template engine for rendering page shells.
//!
//! Pages carry no rendered content. The shell fetches its Markdown source at
//! load time and renders it with the client-side renderer.

use minijinja::{context, AutoEscape, Environment};

use crate::config::{Link, SidebarSection};
use crate::frontmatter::FRONT_MATTER_PATTERN;

/// Context for rendering a page template.
#[derive(Debug, Clone, serde::Serialize)]
pub struct Context {
    /// Page title
    pub title: String,
    /// Site title
    pub site_title: String,
    /// Markdown source, relative to the site root
    pub md_path: String,
    /// Prefix from the page back to the site root, e.g. `../../`
    pub depth: String,
    /// Stylesheet, relative to the site root
    pub stylesheet: String,
    /// Client-side Markdown renderer script URL
    pub renderer_url: String,
    /// Footer text
    pub footer: String,
    /// Sidebar navigation, hrefs relative to the site root
    pub nav: Vec<Link>,
    /// Category dropdown entries, hrefs relative to the site root
    pub categories: Vec<Link>,
    /// Category-specific sidebar section
    pub sidebar: Option<SidebarSection>,
}

/// Template engine using minijinja.
pub struct TemplateEngine {
    env: Environment<'static>,
}

impl TemplateEngine {
    /// Create a new template engine with default templates.
    pub fn new() -> Self {
        let mut env = Environment::new();

        // Values are escaped explicitly; hrefs and the script body must stay verbatim.
        env.set_auto_escape_callback(|_| AutoEscape::None);

        env.add_template_owned("base.html".to_string(), BASE_TEMPLATE.to_string())
            .expect("Failed to add base template");

        env.add_template_owned("page.html".to_string(), PAGE_TEMPLATE.to_string())
            .expect("Failed to add page template");

        env.add_template_owned("sidebar.html".to_string(), SIDEBAR_TEMPLATE.to_string())
            .expect("Failed to add sidebar template");

        Self { env }
    }

    /// Render a page using the specified template.
    pub fn render_page(
        &self,
        template: &str,
        context: &Context,
    ) -> Result<String, minijinja::Error> {
        let tmpl = self.env.get_template(template)?;

        tmpl.render(context! {
            title => &context.title,
            site_title => &context.site_title,
            fetch_target => format!("{}{}", context.depth, context.md_path),
            depth => &context.depth,
            stylesheet => &context.stylesheet,
            renderer_url => &context.renderer_url,
            footer => &context.footer,
            nav => &context.nav,
            categories => &context.categories,
            sidebar => &context.sidebar,
            front_matter_pattern => FRONT_MATTER_PATTERN,
        })
    }
}

impl Default for TemplateEngine {
    fn default() -> Self {
        Self::new()
    }
}

const BASE_TEMPLATE: &str = r##"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{{ title|e }} - {{ site_title|e }}</title>
    <link rel="stylesheet" href="{{ depth }}{{ stylesheet }}">
    <script>
        (function () {
            var theme = localStorage.getItem('theme');
            if (theme) {
                document.documentElement.setAttribute('data-theme', theme);
            }
        })();
    </script>
    <script src="{{ renderer_url }}"></script>
</head>
<body>
    <header>
        <div class="container header-inner">
            <h1><a href="{{ depth }}index.html">{{ site_title|e }}</a></h1>
            <div class="header-actions">
                {% if categories %}
                <div class="dropdown">
                    <button class="dropdown-toggle" type="button" aria-haspopup="true" aria-expanded="false">Categories</button>
                    <ul class="dropdown-menu">
                        {% for item in categories %}
                        <li><a href="{{ depth }}{{ item.href }}">{{ item.title|e }}</a></li>
                        {% endfor %}
                    </ul>
                </div>
                {% endif %}
                <button id="theme-toggle" class="theme-toggle" type="button" aria-label="Toggle dark mode">Toggle theme</button>
            </div>
        </div>
    </header>
    <div class="container">
        <div class="content">
            <nav class="sidebar">
                {% include "sidebar.html" %}
            </nav>
            <main class="main-content" id="content">
                {% block content %}{% endblock %}
            </main>
        </div>
    </div>
    <footer>
        <div class="container">
            <p>{{ footer|e }}</p>
        </div>
    </footer>
    <script>
        (function () {
            var root = document.documentElement;
            document.getElementById('theme-toggle').addEventListener('click', function () {
                var next = root.getAttribute('data-theme') === 'dark' ? 'light' : 'dark';
                root.setAttribute('data-theme', next);
                localStorage.setItem('theme', next);
            });

            document.querySelectorAll('.dropdown-toggle').forEach(function (toggle) {
                toggle.addEventListener('click', function () {
                    var open = toggle.parentElement.classList.toggle('open');
                    toggle.setAttribute('aria-expanded', open ? 'true' : 'false');
                });
            });
        })();
    </script>
    {% block scripts %}{% endblock %}
</body>
</html>"##;

const PAGE_TEMPLATE: &str = r##"{% extends "base.html" %}

{% block content %}
<div class="loading">Loading...</div>
{% endblock %}

{% block scripts %}
<script>
        fetch({{ fetch_target|tojson }})
            .then(function (response) {
                if (!response.ok) {
                    throw new Error(response.status + ' ' + response.statusText);
                }
                return response.text();
            })
            .then(function (markdown) {
                var cleanedMarkdown = markdown.replace({{ front_matter_pattern }}, '');
                document.getElementById('content').innerHTML = marked.parse(cleanedMarkdown);
            })
            .catch(function (error) {
                document.getElementById('content').innerHTML = '<p>Error loading content: ' + error.message + '</p>';
            });
    </script>
{% endblock %}"##;

const SIDEBAR_TEMPLATE: &str = r##"<h2>Documentation</h2>
                <ul>
                    {% for item in nav %}
                    <li><a href="{{ depth }}{{ item.href }}">{{ item.title|e }}</a></li>
                    {% endfor %}
                </ul>
                {% if sidebar %}
                <h2 class="sidebar-section">{{ sidebar.heading|e }}</h2>
                <ul>
                    {% for item in sidebar.links %}
                    <li><a href="{{ item.href }}">{{ item.title|e }}</a></li>
                    {% endfor %}
                </ul>
                {% endif %}"##;

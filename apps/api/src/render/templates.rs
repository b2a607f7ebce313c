//! Askama templates for the built-in CV layouts.
//!
//! All three share the same context: the document, the summary text, the
//! non-empty contact fields, and either inline CSS or a stylesheet link.

use askama::Template;

use crate::cv::CvData;

#[derive(Template)]
#[template(
    source = r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{{ cv.display_name() }}</title>
    {% if let Some(css) = inline_css %}<style>{{ css|safe }}</style>{% else %}<link rel="stylesheet" href="styles.css">{% endif %}
</head>
<body class="modern">
    <header class="banner">
        <h1 data-field="fullName">{{ cv.header.full_name }}</h1>
        {% if !cv.header.title.is_empty() %}<p class="title" data-field="title">{{ cv.header.title }}</p>{% endif %}
        {% if !contacts.is_empty() %}<p class="contacts">{{ contacts|join(" · ") }}</p>{% endif %}
    </header>
    <div class="columns">
        <aside class="sidebar">
            {% if !cv.skills.technical.is_empty() %}
            <section><h2>Technical skills</h2><ul>{% for skill in cv.skills.technical %}<li>{{ skill }}</li>{% endfor %}</ul></section>
            {% endif %}
            {% if !cv.skills.soft.is_empty() %}
            <section><h2>Soft skills</h2><ul>{% for skill in cv.skills.soft %}<li>{{ skill }}</li>{% endfor %}</ul></section>
            {% endif %}
            {% if !cv.programming_languages.is_empty() %}
            <section><h2>Languages</h2><ul class="tags">{% for lang in cv.programming_languages %}<li>{{ lang }}</li>{% endfor %}</ul></section>
            {% endif %}
            {% if !cv.software_tools.is_empty() %}
            <section><h2>Tools</h2><ul class="tags">{% for tool in cv.software_tools %}<li>{{ tool }}</li>{% endfor %}</ul></section>
            {% endif %}
        </aside>
        <main>
            {% if !summary.is_empty() %}
            <section><h2>Profile</h2><p>{{ summary }}</p></section>
            {% endif %}
            {% if !cv.experience.is_empty() %}
            <section><h2>Experience</h2>
            {% for exp in cv.experience %}
                <article class="entry">
                    <h3>{{ exp.position }}{% if !exp.company.is_empty() %} <span class="at">at {{ exp.company }}</span>{% endif %}</h3>
                    <p class="meta">{{ exp.start_date }}{% if exp.current %} – Present{% else if !exp.end_date.is_empty() %} – {{ exp.end_date }}{% endif %}{% if !exp.location.is_empty() %} · {{ exp.location }}{% endif %}</p>
                    {% if !exp.description.is_empty() %}<p>{{ exp.description }}</p>{% endif %}
                    {% if !exp.achievements.is_empty() %}<ul>{% for item in exp.achievements %}<li>{{ item }}</li>{% endfor %}</ul>{% endif %}
                </article>
            {% endfor %}
            </section>
            {% endif %}
            {% if !cv.education.is_empty() %}
            <section><h2>Education</h2>
            {% for edu in cv.education %}
                <article class="entry">
                    <h3>{{ edu.degree }}{% if !edu.field.is_empty() %}, {{ edu.field }}{% endif %}</h3>
                    <p class="meta">{{ edu.institution }}{% if !edu.start_date.is_empty() %} · {{ edu.start_date }}{% endif %}{% if !edu.end_date.is_empty() %} – {{ edu.end_date }}{% endif %}{% if !edu.grade.is_empty() %} · {{ edu.grade }}{% endif %}</p>
                    {% if !edu.description.is_empty() %}<p>{{ edu.description }}</p>{% endif %}
                </article>
            {% endfor %}
            </section>
            {% endif %}
            {% if !cv.volunteering.is_empty() %}
            <section><h2>Volunteering</h2>
            {% for vol in cv.volunteering %}
                <article class="entry">
                    <h3>{{ vol.role }}{% if !vol.organization.is_empty() %} <span class="at">at {{ vol.organization }}</span>{% endif %}</h3>
                    <p class="meta">{{ vol.start_date }}{% if !vol.end_date.is_empty() %} – {{ vol.end_date }}{% endif %}</p>
                    {% if !vol.description.is_empty() %}<p>{{ vol.description }}</p>{% endif %}
                </article>
            {% endfor %}
            </section>
            {% endif %}
            {% for section in cv.custom_sections %}
            <section><h2>{{ section.title }}</h2><ul>{% for item in section.items %}<li>{{ item }}</li>{% endfor %}</ul></section>
            {% endfor %}
        </main>
    </div>
</body>
</html>"#,
    ext = "html"
)]
pub struct ModernTemplate<'a> {
    pub cv: &'a CvData,
    pub summary: &'a str,
    pub contacts: Vec<&'a str>,
    pub inline_css: Option<&'a str>,
}

#[derive(Template)]
#[template(
    source = r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{{ cv.display_name() }}</title>
    {% if let Some(css) = inline_css %}<style>{{ css|safe }}</style>{% else %}<link rel="stylesheet" href="styles.css">{% endif %}
</head>
<body class="classic">
    <div class="page">
        <header>
            <h1 data-field="fullName">{{ cv.header.full_name }}</h1>
            {% if !cv.header.title.is_empty() %}<p class="title" data-field="title">{{ cv.header.title }}</p>{% endif %}
            {% if !contacts.is_empty() %}<p class="contacts">{{ contacts|join(" | ") }}</p>{% endif %}
        </header>
        {% if !summary.is_empty() %}
        <section><h2>Summary</h2><hr><p>{{ summary }}</p></section>
        {% endif %}
        {% if !cv.experience.is_empty() %}
        <section><h2>Professional Experience</h2><hr>
        {% for exp in cv.experience %}
            <div class="entry">
                <div class="row"><strong>{{ exp.company }}</strong><span>{{ exp.location }}</span></div>
                <div class="row"><em>{{ exp.position }}</em><span>{{ exp.start_date }}{% if exp.current %} – Present{% else if !exp.end_date.is_empty() %} – {{ exp.end_date }}{% endif %}</span></div>
                {% if !exp.description.is_empty() %}<p>{{ exp.description }}</p>{% endif %}
                {% if !exp.achievements.is_empty() %}<ul>{% for item in exp.achievements %}<li>{{ item }}</li>{% endfor %}</ul>{% endif %}
            </div>
        {% endfor %}
        </section>
        {% endif %}
        {% if !cv.education.is_empty() %}
        <section><h2>Education</h2><hr>
        {% for edu in cv.education %}
            <div class="entry">
                <div class="row"><strong>{{ edu.institution }}</strong><span>{{ edu.start_date }}{% if !edu.end_date.is_empty() %} – {{ edu.end_date }}{% endif %}</span></div>
                <div class="row"><em>{{ edu.degree }}{% if !edu.field.is_empty() %} in {{ edu.field }}{% endif %}</em><span>{{ edu.grade }}</span></div>
                {% if !edu.description.is_empty() %}<p>{{ edu.description }}</p>{% endif %}
            </div>
        {% endfor %}
        </section>
        {% endif %}
        {% if !cv.skills.technical.is_empty() || !cv.skills.soft.is_empty() || !cv.programming_languages.is_empty() || !cv.software_tools.is_empty() %}
        <section><h2>Skills</h2><hr>
            <dl>
                {% if !cv.skills.technical.is_empty() %}<dt>Technical</dt><dd>{{ cv.skills.technical|join(", ") }}</dd>{% endif %}
                {% if !cv.skills.soft.is_empty() %}<dt>Interpersonal</dt><dd>{{ cv.skills.soft|join(", ") }}</dd>{% endif %}
                {% if !cv.programming_languages.is_empty() %}<dt>Programming</dt><dd>{{ cv.programming_languages|join(", ") }}</dd>{% endif %}
                {% if !cv.software_tools.is_empty() %}<dt>Software</dt><dd>{{ cv.software_tools|join(", ") }}</dd>{% endif %}
            </dl>
        </section>
        {% endif %}
        {% if !cv.volunteering.is_empty() %}
        <section><h2>Volunteering</h2><hr>
        {% for vol in cv.volunteering %}
            <div class="entry">
                <div class="row"><strong>{{ vol.organization }}</strong><span>{{ vol.start_date }}{% if !vol.end_date.is_empty() %} – {{ vol.end_date }}{% endif %}</span></div>
                <div class="row"><em>{{ vol.role }}</em></div>
                {% if !vol.description.is_empty() %}<p>{{ vol.description }}</p>{% endif %}
            </div>
        {% endfor %}
        </section>
        {% endif %}
        {% for section in cv.custom_sections %}
        <section><h2>{{ section.title }}</h2><hr><ul>{% for item in section.items %}<li>{{ item }}</li>{% endfor %}</ul></section>
        {% endfor %}
    </div>
</body>
</html>"#,
    ext = "html"
)]
pub struct ClassicTemplate<'a> {
    pub cv: &'a CvData,
    pub summary: &'a str,
    pub contacts: Vec<&'a str>,
    pub inline_css: Option<&'a str>,
}

#[derive(Template)]
#[template(
    source = r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{{ cv.display_name() }}</title>
    {% if let Some(css) = inline_css %}<style>{{ css|safe }}</style>{% else %}<link rel="stylesheet" href="styles.css">{% endif %}
</head>
<body class="minimal">
    <h1 data-field="fullName">{{ cv.header.full_name }}</h1>
    {% if !cv.header.title.is_empty() %}<p data-field="title">{{ cv.header.title }}</p>{% endif %}
    {% for contact in contacts %}<span class="contact">{{ contact }}</span>{% endfor %}
    {% if !summary.is_empty() %}<p class="summary">{{ summary }}</p>{% endif %}
    {% if !cv.experience.is_empty() %}
    <h2>Experience</h2>
    <ul>{% for exp in cv.experience %}<li>{{ exp.position }}, {{ exp.company }} ({{ exp.start_date }}{% if exp.current %}–now{% else if !exp.end_date.is_empty() %}–{{ exp.end_date }}{% endif %}){% if !exp.description.is_empty() %}: {{ exp.description }}{% endif %}</li>{% endfor %}</ul>
    {% endif %}
    {% if !cv.education.is_empty() %}
    <h2>Education</h2>
    <ul>{% for edu in cv.education %}<li>{{ edu.degree }}, {{ edu.institution }}{% if !edu.end_date.is_empty() %} ({{ edu.end_date }}){% endif %}</li>{% endfor %}</ul>
    {% endif %}
    {% if !cv.skills.technical.is_empty() %}<h2>Skills</h2><p>{{ cv.skills.technical|join(", ") }}</p>{% endif %}
    {% if !cv.programming_languages.is_empty() %}<h2>Languages</h2><p>{{ cv.programming_languages|join(", ") }}</p>{% endif %}
    {% if !cv.software_tools.is_empty() %}<h2>Tools</h2><p>{{ cv.software_tools|join(", ") }}</p>{% endif %}
    {% if !cv.volunteering.is_empty() %}
    <h2>Volunteering</h2>
    <ul>{% for vol in cv.volunteering %}<li>{{ vol.role }}, {{ vol.organization }}</li>{% endfor %}</ul>
    {% endif %}
    {% for section in cv.custom_sections %}<h2>{{ section.title }}</h2><ul>{% for item in section.items %}<li>{{ item }}</li>{% endfor %}</ul>{% endfor %}
</body>
</html>"#,
    ext = "html"
)]
pub struct MinimalTemplate<'a> {
    pub cv: &'a CvData,
    pub summary: &'a str,
    pub contacts: Vec<&'a str>,
    pub inline_css: Option<&'a str>,
}

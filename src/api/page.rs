//! Single-page report form.
//!
//! Rendered server-side from `FormOptions`; the page posts the selections
//! to `/api/explain` and shows the returned text, with the glossary from
//! `/api/glossary` in a collapsible panel.

use axum::response::Html;

use crate::form::{FormOptions, SelectField};

/// GET / — the report form
pub async fn form_page() -> Html<String> {
    Html(render_form_page(&FormOptions::build()))
}

fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
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

fn render_select(select: &SelectField) -> String {
    let options: String = select
        .options
        .iter()
        .map(|opt| {
            let opt = escape(opt);
            format!(r#"<option value="{opt}">{opt}</option>"#)
        })
        .collect();
    let help = select
        .help
        .map(|h| format!(r#"<p class="help">{}</p>"#, escape(h)))
        .unwrap_or_default();

    format!(
        r#"<label for="{field}">{caption}</label>
<select id="{field}" name="{field}">{options}</select>
{help}"#,
        field = select.field,
        caption = escape(select.caption),
    )
}

/// Render the form page.
pub fn render_form_page(form: &FormOptions) -> String {
    let selects: String = form.selects.iter().map(render_select).collect();
    let imaging: String = form
        .imaging
        .iter()
        .map(|s| format!(r#"<div class="cell">{}</div>"#, render_select(s)))
        .collect();

    format!(
        r##"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{title}</title>
<style>
*,*::before,*::after{{box-sizing:border-box}}
body{{margin:0;font-family:-apple-system,BlinkMacSystemFont,'Segoe UI',Roboto,sans-serif;background:#fafaf9;color:#1c1917;padding:24px}}
.card{{background:#fff;border-radius:16px;box-shadow:0 4px 24px rgba(0,0,0,.08);max-width:720px;margin:0 auto;padding:32px}}
h1{{font-size:1.5rem;margin:0 0 8px}}
h2{{font-size:1.1rem;margin:24px 0 8px}}
label{{display:block;font-weight:600;font-size:.9rem;margin:16px 0 4px}}
select,input{{width:100%;padding:10px;border:1px solid #d6d3d1;border-radius:8px;font-size:1rem}}
.help{{font-size:.8rem;color:#78716c;margin:4px 0 0}}
.grid{{display:grid;grid-template-columns:1fr 1fr;gap:0 16px}}
.btn{{display:block;width:100%;padding:16px;border:none;border-radius:12px;font-size:1rem;font-weight:600;cursor:pointer;margin-top:24px;background:#2DD4BF;color:#fff}}
pre{{white-space:pre-wrap;font-family:inherit;line-height:1.5;background:#f5f5f4;border-radius:12px;padding:16px}}
.error{{color:#b91c1c}}
.hidden{{display:none}}
</style>
</head>
<body>
<div class="card">
  <h1>{title}</h1>
  <p>{intro}</p>
  <form id="report">
    <label for="{age_field}">{age_caption}</label>
    <input id="{age_field}" name="{age_field}" type="number" min="{age_min}" max="{age_max}" value="{age_default}">
    {selects}
    <h2>Imaging Tests Done</h2>
    <div class="grid">{imaging}</div>
    <button type="submit" class="btn">Explain This Report</button>
  </form>
  <div id="result" class="hidden">
    <h2>📋 Your Personalized Medical Report Explanation</h2>
    <pre id="explanation"></pre>
    <details id="glossary">
      <summary>🔍 Want to Learn More About Medical Terms?</summary>
      <p>Click here to see explanations of medical terms we used:</p>
      <div id="terms"></div>
    </details>
  </div>
  <p id="error" class="error hidden"></p>
</div>
<script>
(function(){{
  var form=document.getElementById('report');
  function show(id,on){{document.getElementById(id).classList.toggle('hidden',!on);}}
  function loadGlossary(){{
    fetch('/api/glossary').then(function(r){{return r.json();}}).then(function(g){{
      var box=document.getElementById('terms');
      box.innerHTML='';
      g.entries.forEach(function(e){{
        var p=document.createElement('p');
        var b=document.createElement('strong');
        b.textContent=e.term;
        p.appendChild(b);
        p.appendChild(document.createTextNode(': '+e.explanation));
        box.appendChild(p);
      }});
    }});
  }}
  form.addEventListener('submit',function(ev){{
    ev.preventDefault();
    var data={{}};
    new FormData(form).forEach(function(v,k){{data[k]=v;}});
    data.age=parseInt(data.age,10);
    fetch('/api/explain',{{method:'POST',headers:{{'Content-Type':'application/json'}},body:JSON.stringify(data)}})
      .then(function(r){{return r.json().then(function(j){{return {{ok:r.ok,body:j}};}});}})
      .then(function(res){{
        if(!res.ok){{
          document.getElementById('error').textContent=res.body.error.message;
          show('error',true);show('result',false);return;
        }}
        document.getElementById('explanation').textContent=res.body.text;
        show('error',false);show('result',true);
        loadGlossary();
      }})
      .catch(function(){{
        document.getElementById('error').textContent='Could not reach the explainer. Please try again.';
        show('error',true);show('result',false);
      }});
  }});
}})();
</script>
</body>
</html>"##,
        title = escape(form.title),
        intro = escape(form.intro),
        age_field = form.age.field,
        age_caption = escape(form.age.caption),
        age_min = form.age.min,
        age_max = form.age.max,
        age_default = form.age.default,
        selects = selects,
        imaging = imaging,
    )
}

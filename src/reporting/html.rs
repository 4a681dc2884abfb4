// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

/**
 * Bountyy Oy - HTML Report Generator
 * Self-contained report with inline CSS/JS, stat cards and a searchable
 * findings table
 *
 * @copyright 2026 Bountyy Oy
 * @license Proprietary
 */

use anyhow::{Context, Result};
use std::path::Path;

use crate::types::Finding;

pub fn save(findings: &[Finding], path: &Path) -> Result<()> {
    let html = render(findings);
    std::fs::write(path, html)
        .with_context(|| format!("Failed to write HTML report to {}", path.display()))
}

pub fn render(findings: &[Finding]) -> String {
    let summary = Summary::of(findings);
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>Harava Scan Report</title>
    <style>
{}
    </style>
</head>
<body>
    <div class="container">
        <div class="header">
            <h1>Harava</h1>
            <p>Content Discovery Report &mdash; generated {}</p>
        </div>
{}
        <div class="search-box">
            <input type="text" id="searchInput" placeholder="Search findings (URL, status, server, secrets, WAF...)">
        </div>
        <table id="resultsTable">
            <thead>
                <tr>
                    <th>Status</th>
                    <th>URL</th>
                    <th>Size</th>
                    <th>Technology</th>
                    <th>Security</th>
                    <th>Action</th>
                </tr>
            </thead>
            <tbody>
{}
            </tbody>
        </table>
    </div>
    <script>
{}
    </script>
</body>
</html>"#,
        css(),
        chrono::Utc::now().format("%Y-%m-%d %H:%M:%S UTC"),
        stat_cards(&summary),
        table_rows(findings),
        javascript()
    )
}

struct Summary {
    total: usize,
    success_2xx: usize,
    redirects_3xx: usize,
    critical: usize,
    secrets: usize,
    waf: usize,
}

impl Summary {
    fn of(findings: &[Finding]) -> Self {
        Self {
            total: findings.len(),
            success_2xx: findings.iter().filter(|f| (200..300).contains(&f.status)).count(),
            redirects_3xx: findings.iter().filter(|f| (300..400).contains(&f.status)).count(),
            critical: findings.iter().filter(|f| f.critical).count(),
            secrets: findings.iter().filter(|f| f.secret_found).count(),
            waf: findings.iter().filter(|f| f.waf_detected.is_some()).count(),
        }
    }
}

fn stat_cards(summary: &Summary) -> String {
    format!(
        r#"        <div class="stats">
            <div class="stat-card"><div class="stat-value">{}</div><div>Total Findings</div></div>
            <div class="stat-card"><div class="stat-value ok">{}</div><div>Success (2xx)</div></div>
            <div class="stat-card"><div class="stat-value redirect">{}</div><div>Redirects (3xx)</div></div>
            <div class="stat-card"><div class="stat-value critical">{}</div><div>Critical</div></div>
            <div class="stat-card"><div class="stat-value secret">{}</div><div>Secrets</div></div>
            <div class="stat-card"><div class="stat-value waf">{}</div><div>WAF Detected</div></div>
        </div>"#,
        summary.total,
        summary.success_2xx,
        summary.redirects_3xx,
        summary.critical,
        summary.secrets,
        summary.waf
    )
}

fn table_rows(findings: &[Finding]) -> String {
    let mut rows = String::new();
    for finding in findings {
        let status_class = match finding.status {
            200..=299 => "status-200",
            300..=399 => "status-300",
            400..=499 => "status-400",
            _ => "status-500",
        };

        let critical_badge = if finding.critical {
            r#" <span class="critical-badge">CRITICAL</span>"#
        } else {
            ""
        };

        let mut tech = String::new();
        if let Some(server) = &finding.server {
            tech.push_str(&format!(
                r#"<span class="tech-badge">{}</span>"#,
                escape_html(server)
            ));
        }
        if let Some(powered_by) = &finding.powered_by {
            tech.push_str(&format!(
                r#"<span class="tech-badge">{}</span>"#,
                escape_html(powered_by)
            ));
        }

        let mut security = String::new();
        if finding.secret_found {
            security.push_str(&format!(
                r#"<span class="secret-badge">{}</span> "#,
                escape_html(&finding.secret_types.join(", "))
            ));
        }
        if let Some(waf) = &finding.waf_detected {
            security.push_str(&format!(
                r#"<span class="waf-badge">WAF: {}</span>"#,
                escape_html(waf)
            ));
        }

        rows.push_str(&format!(
            r#"                <tr>
                    <td class="{}">{}</td>
                    <td><code>{}</code>{}</td>
                    <td>{} bytes</td>
                    <td>{}</td>
                    <td>{}</td>
                    <td><button class="curl-btn" data-curl="{}">Copy Curl</button></td>
                </tr>
"#,
            status_class,
            finding.status,
            escape_html(&finding.url),
            critical_badge,
            finding.size,
            tech,
            security,
            escape_html(&finding.curl_command)
        ));
    }
    rows
}

fn css() -> &'static str {
    r#"        * { margin: 0; padding: 0; box-sizing: border-box; }
        body {
            font-family: 'JetBrains Mono', 'Courier New', monospace;
            line-height: 1.6;
            color: #e0e0e0;
            background-color: #0a0a0a;
            padding: 20px;
        }
        .container { max-width: 1400px; margin: 0 auto; }
        .header {
            background: linear-gradient(135deg, #0f0f0f 0%, #1a1a1a 100%);
            color: #39ff14;
            padding: 40px;
            border-radius: 10px;
            margin-bottom: 30px;
            border: 1px solid #39ff14;
            box-shadow: 0 0 30px rgba(57, 255, 20, 0.15);
        }
        .header h1 {
            font-size: 2.5em;
            margin-bottom: 10px;
            text-shadow: 0 0 20px rgba(57, 255, 20, 0.5);
        }
        .header p { color: #b0b0b0; }
        .stats {
            display: grid;
            grid-template-columns: repeat(auto-fit, minmax(160px, 1fr));
            gap: 20px;
            margin-bottom: 30px;
        }
        .stat-card {
            text-align: center;
            padding: 20px;
            border-radius: 8px;
            background: #1a1a1a;
            border: 1px solid #2a2a2a;
        }
        .stat-value { font-size: 2em; font-weight: bold; color: #39ff14; }
        .stat-value.ok { color: #00ff88; }
        .stat-value.redirect { color: #4da6ff; }
        .stat-value.critical { color: #ff8c00; }
        .stat-value.secret { color: #ff4444; }
        .stat-value.waf { color: #ff00ff; }
        .search-box {
            margin-bottom: 20px;
            padding: 15px;
            background: #111111;
            border-radius: 8px;
            border: 1px solid #2a2a2a;
        }
        #searchInput {
            width: 100%;
            padding: 12px;
            font-size: 15px;
            font-family: inherit;
            border: 1px solid #39ff14;
            border-radius: 6px;
            background: #0a0a0a;
            color: #e0e0e0;
        }
        table {
            width: 100%;
            background: #111111;
            border-radius: 8px;
            overflow: hidden;
            border-collapse: collapse;
            border: 1px solid #2a2a2a;
        }
        th {
            background: #1a1a1a;
            color: #39ff14;
            padding: 14px;
            text-align: left;
            text-transform: uppercase;
            font-size: 0.85em;
        }
        td { padding: 12px 14px; border-bottom: 1px solid #2a2a2a; }
        tr:hover { background: rgba(57, 255, 20, 0.06); }
        .status-200 { color: #00ff88; font-weight: bold; }
        .status-300 { color: #4da6ff; font-weight: bold; }
        .status-400 { color: #ff4444; font-weight: bold; }
        .status-500 { color: #ffaa00; font-weight: bold; }
        .critical-badge {
            background: rgba(255, 140, 0, 0.2);
            border: 1px solid #ff8c00;
            color: #ff8c00;
            padding: 2px 8px;
            border-radius: 4px;
            font-size: 0.8em;
            font-weight: bold;
            margin-left: 6px;
        }
        .secret-badge {
            display: inline-block;
            background: rgba(255, 0, 0, 0.2);
            border: 1px solid #ff4444;
            color: #ff4444;
            padding: 2px 8px;
            border-radius: 4px;
            font-size: 0.8em;
            font-weight: bold;
        }
        .waf-badge {
            display: inline-block;
            background: rgba(255, 0, 255, 0.2);
            border: 1px solid #ff00ff;
            color: #ff00ff;
            padding: 2px 8px;
            border-radius: 4px;
            font-size: 0.8em;
            font-weight: bold;
        }
        .tech-badge {
            display: inline-block;
            background: rgba(100, 200, 255, 0.15);
            color: #4da6ff;
            padding: 2px 8px;
            border-radius: 4px;
            margin-right: 5px;
            font-size: 0.85em;
        }
        .curl-btn {
            background: #1a1a1a;
            color: #39ff14;
            border: 1px solid #39ff14;
            padding: 6px 12px;
            border-radius: 4px;
            cursor: pointer;
            font-family: inherit;
            font-size: 0.85em;
        }
        .curl-btn:hover { background: rgba(57, 255, 20, 0.15); }
        code {
            background: #0a0a0a;
            padding: 2px 6px;
            border-radius: 4px;
            font-size: 0.9em;
        }"#
}

fn javascript() -> &'static str {
    r#"        document.getElementById('searchInput').addEventListener('input', function(e) {
            const term = e.target.value.toLowerCase();
            document.querySelectorAll('#resultsTable tbody tr').forEach(row => {
                row.style.display = row.textContent.toLowerCase().includes(term) ? '' : 'none';
            });
        });
        document.querySelectorAll('.curl-btn').forEach(btn => {
            btn.addEventListener('click', () => {
                navigator.clipboard.writeText(btn.dataset.curl).then(() => {
                    btn.textContent = 'Copied!';
                    setTimeout(() => { btn.textContent = 'Copy Curl'; }, 1500);
                });
            });
        });"#
}

fn escape_html(raw: &str) -> String {
    raw.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn finding(status: u16, url: &str) -> Finding {
        Finding {
            url: url.to_string(),
            status,
            size: 100,
            word_count: 10,
            line_count: 2,
            critical: false,
            method: "GET".to_string(),
            timestamp: "2026-01-05T10:00:00+00:00".to_string(),
            server: None,
            powered_by: None,
            user_agent: "Mozilla/5.0".to_string(),
            secret_found: false,
            secret_types: Vec::new(),
            waf_detected: None,
            curl_command: r#"curl -X GET "http://t.example/a""#.to_string(),
        }
    }

    #[test]
    fn test_render_contains_findings_and_cards() {
        let findings = vec![
            finding(200, "http://t.example/admin"),
            finding(301, "http://t.example/images"),
        ];
        let html = render(&findings);
        assert!(html.contains("http://t.example/admin"));
        assert!(html.contains("Total Findings"));
        assert!(html.contains("searchInput"));
        assert!(html.contains("Copy Curl"));
    }

    #[test]
    fn test_render_escapes_markup() {
        let mut f = finding(200, "http://t.example/<script>alert(1)</script>");
        f.server = Some(r#"weird"server"#.to_string());
        let html = render(&[f]);
        assert!(!html.contains("<script>alert(1)</script>"));
        assert!(html.contains("&lt;script&gt;"));
        assert!(html.contains("weird&quot;server"));
    }
}

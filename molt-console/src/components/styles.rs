pub const CONSOLE_STYLES: &str = r#"
:root {
    --console-bg: #0f172a;
    --panel-bg: #111827;
    --panel-alt-bg: #1e293b;
    --border-color: #334155;
    --text-primary: #f8fafc;
    --text-secondary: #94a3b8;
    --accent: #6366f1;
    --danger: #dc2626;
}

body {
    margin: 0;
    background: var(--console-bg);
    color: var(--text-primary);
    font-family: Inter, system-ui, -apple-system, sans-serif;
}

/* Shell */
.console-shell {
    display: flex;
    flex-direction: column;
    min-height: 100vh;
}

.console-header {
    display: flex;
    align-items: center;
    justify-content: space-between;
    padding: 0.75rem 1.25rem;
    background: var(--panel-alt-bg);
    border-bottom: 1px solid var(--border-color);
}

.console-title {
    font-weight: 700;
    font-size: 1.05rem;
    letter-spacing: 0.02em;
}

.console-nav {
    display: flex;
    gap: 1rem;
}

.console-nav a {
    color: var(--text-secondary);
    text-decoration: none;
    font-size: 0.9rem;
}

.console-nav a:hover {
    color: var(--text-primary);
}

.console-main {
    flex: 1;
    padding: 1.25rem;
    display: flex;
    flex-direction: column;
    gap: 1rem;
}

/* Panels */
.panel {
    background: var(--panel-bg);
    border: 1px solid var(--border-color);
    border-radius: 8px;
    padding: 1rem;
    display: flex;
    flex-direction: column;
    gap: 0.75rem;
}

.panel-title {
    margin: 0;
    font-size: 1rem;
    font-weight: 600;
}

.panel-subtitle {
    margin: 0;
    font-size: 0.8rem;
    color: var(--text-secondary);
}

.banner-error {
    padding: 0.6rem 0.8rem;
    border-radius: 6px;
    border: 1px solid rgba(220, 38, 38, 0.4);
    background: rgba(220, 38, 38, 0.12);
    color: #fca5a5;
    font-size: 0.85rem;
}

.guide summary {
    cursor: pointer;
}

.guide-section h4 {
    margin: 0.5rem 0 0.25rem;
    font-size: 0.9rem;
}

.guide-section dt {
    font-weight: 600;
    font-size: 0.85rem;
}

.guide-section dd {
    margin: 0 0 0.4rem 0;
    font-size: 0.8rem;
    color: var(--text-secondary);
}

.muted {
    color: var(--text-secondary);
    font-size: 0.85rem;
}

/* Tables */
.data-table {
    width: 100%;
    border-collapse: collapse;
    font-size: 0.85rem;
}

.data-table th {
    text-align: left;
    padding: 0.5rem;
    border-bottom: 1px solid var(--border-color);
    color: var(--text-secondary);
    font-weight: 600;
    user-select: none;
}

.data-table th.sortable {
    cursor: pointer;
}

.data-table td {
    padding: 0.5rem;
    border-bottom: 1px solid rgba(51, 65, 85, 0.5);
    vertical-align: top;
}

.data-table a {
    color: #a5b4fc;
}

.cell-code {
    margin: 0;
    white-space: pre-wrap;
    word-break: break-all;
    font-family: ui-monospace, SFMono-Regular, Menlo, monospace;
    font-size: 0.78rem;
}

/* Chips */
.chip {
    display: inline-block;
    padding: 0.1rem 0.5rem;
    border-radius: 999px;
    font-size: 0.75rem;
    font-weight: 600;
}

/* Stats */
.stats-grid {
    display: grid;
    grid-template-columns: repeat(auto-fill, minmax(160px, 1fr));
    gap: 0.75rem;
}

.stat-item {
    background: var(--panel-alt-bg);
    border-radius: 6px;
    padding: 0.6rem 0.75rem;
}

.stat-label {
    font-size: 0.72rem;
    color: var(--text-secondary);
    text-transform: uppercase;
}

.stat-value {
    font-size: 1.05rem;
    font-weight: 600;
}

/* Forms */
.form-section {
    display: flex;
    flex-direction: column;
    gap: 0.6rem;
}

.field {
    display: flex;
    flex-direction: column;
    gap: 0.25rem;
}

.field label {
    font-size: 0.8rem;
    color: var(--text-secondary);
}

.field input,
.field select {
    background: var(--console-bg);
    color: var(--text-primary);
    border: 1px solid var(--border-color);
    border-radius: 6px;
    padding: 0.45rem 0.6rem;
    font-size: 0.85rem;
}

.field input.invalid {
    border-color: var(--danger);
}

.field-error {
    color: #fca5a5;
    font-size: 0.75rem;
}

.toggle {
    display: flex;
    align-items: center;
    gap: 0.5rem;
    font-size: 0.85rem;
    cursor: pointer;
}

.select-cards {
    display: grid;
    grid-template-columns: repeat(auto-fill, minmax(220px, 1fr));
    gap: 0.75rem;
}

.select-card {
    text-align: left;
    background: var(--panel-alt-bg);
    color: var(--text-primary);
    border: 1px solid var(--border-color);
    border-radius: 8px;
    padding: 0.75rem;
    cursor: pointer;
}

.select-card.selected {
    border-color: var(--accent);
    box-shadow: 0 0 0 1px var(--accent);
}

.select-card-title {
    font-weight: 600;
    margin-bottom: 0.25rem;
}

.select-card-body {
    font-size: 0.78rem;
    color: var(--text-secondary);
}

.command-preview {
    margin: 0;
    padding: 0.75rem;
    background: #020617;
    border-radius: 6px;
    font-family: ui-monospace, SFMono-Regular, Menlo, monospace;
    font-size: 0.8rem;
    white-space: pre-wrap;
}

.btn {
    background: var(--accent);
    color: white;
    border: none;
    border-radius: 6px;
    padding: 0.45rem 0.9rem;
    font-size: 0.85rem;
    cursor: pointer;
}

.btn:disabled {
    opacity: 0.5;
    cursor: not-allowed;
}

.btn-secondary {
    background: transparent;
    border: 1px solid var(--border-color);
    color: var(--text-primary);
}

.btn-danger {
    background: transparent;
    border: 1px solid rgba(220, 38, 38, 0.5);
    color: #fca5a5;
}

.row {
    display: flex;
    align-items: center;
    gap: 0.6rem;
    flex-wrap: wrap;
}

.spread {
    justify-content: space-between;
}
"#;

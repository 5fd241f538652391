use axum::{
    http::header,
    response::{Html, IntoResponse},
};

pub async fn dashboard() -> impl IntoResponse {
    (
        [(header::CACHE_CONTROL, "public, max-age=60")],
        Html(DASHBOARD_HTML),
    )
}

const DASHBOARD_HTML: &str = r##"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>Odtok Novákova</title>
    <link rel="stylesheet" href="https://cdn.jsdelivr.net/npm/uplot@1.6.31/dist/uPlot.min.css">
    <style>
        :root {
            --bg: #f8fafc;
            --surface: #ffffff;
            --border: #e2e8f0;
            --text: #1e293b;
            --muted: #64748b;
            --accent: #2563eb;
            --danger: #dc2626;
        }
        @media (prefers-color-scheme: dark) {
            :root {
                --bg: #0f172a;
                --surface: #1e293b;
                --border: #334155;
                --text: #e2e8f0;
                --muted: #94a3b8;
                --accent: #60a5fa;
                --danger: #f87171;
            }
        }
        * { box-sizing: border-box; margin: 0; padding: 0; }
        body { font-family: system-ui, -apple-system, sans-serif; background: var(--bg); color: var(--text); min-height: 100vh; }

        .container {
            max-width: 1100px;
            margin: 0 auto;
            padding: 1.5rem;
        }

        header {
            display: flex;
            justify-content: space-between;
            align-items: baseline;
            margin-bottom: 1.5rem;
            flex-wrap: wrap;
            gap: 1rem;
        }
        h1 { font-size: 1.5rem; font-weight: 700; }

        .today-strip {
            font-size: 0.875rem;
            color: var(--muted);
        }
        .today-strip strong { color: var(--text); }

        .range-controls {
            display: flex;
            align-items: center;
            gap: 0.75rem;
            flex-wrap: wrap;
            background: var(--surface);
            border: 1px solid var(--border);
            border-radius: 0.5rem;
            padding: 1rem;
            margin-bottom: 1rem;
        }
        .range-controls label { font-size: 0.875rem; font-weight: 600; }
        .range-controls input {
            padding: 0.375rem 0.5rem;
            border: 1px solid var(--border);
            border-radius: 0.375rem;
            background: var(--bg);
            color: var(--text);
            font: inherit;
            font-size: 0.875rem;
        }
        .range-controls button {
            padding: 0.375rem 1rem;
            border: 1px solid var(--accent);
            border-radius: 0.375rem;
            background: var(--accent);
            color: white;
            font-size: 0.875rem;
            cursor: pointer;
        }

        .status { margin-bottom: 1rem; font-size: 0.875rem; color: var(--muted); }
        .error { color: var(--danger); }
        .hidden { display: none; }

        .chart-section, .stats-section {
            background: var(--surface);
            border: 1px solid var(--border);
            border-radius: 0.5rem;
            padding: 1rem;
            margin-bottom: 1rem;
        }

        table { width: 100%; border-collapse: collapse; font-size: 0.875rem; }
        th, td { text-align: left; padding: 0.5rem; border-bottom: 1px solid var(--border); }
        th { color: var(--muted); font-weight: 600; }
        td.row-label { font-weight: 600; }
    </style>
</head>
<body>
    <div class="container">
        <header>
            <h1>Odtok Novákova</h1>
            <div class="today-strip" id="today-strip"></div>
        </header>

        <div class="range-controls">
            <label for="start-input" id="range-label">Date Range:</label>
            <input type="datetime-local" id="start-input">
            <span>&ndash;</span>
            <input type="datetime-local" id="end-input">
            <button id="apply-btn">OK</button>
        </div>

        <div class="status" id="loading"></div>
        <div class="status error hidden" id="error"></div>

        <div class="chart-section" id="chart-section">
            <div id="chart"></div>
        </div>

        <div class="stats-section" id="stats-section">
            <table>
                <thead>
                    <tr>
                        <th></th>
                        <th id="th-height"></th>
                        <th id="th-times"></th>
                    </tr>
                </thead>
                <tbody>
                    <tr>
                        <td class="row-label" id="label-max"></td>
                        <td id="max-value"></td>
                        <td id="max-times"></td>
                    </tr>
                    <tr>
                        <td class="row-label" id="label-median"></td>
                        <td id="median-value"></td>
                        <td>-</td>
                    </tr>
                </tbody>
            </table>
        </div>
    </div>

    <script src="https://cdn.jsdelivr.net/npm/uplot@1.6.31/dist/uPlot.iife.min.js"></script>
<script>
const locale = navigator.language || 'en';

const api = url => fetch(url).then(async r => {
    const body = await r.json();
    if (!r.ok) throw new Error(body.err_msg || 'Request failed');
    return body;
});

const state = {
    chart: null,
    labels: null,
    rangeSeq: 0,   // requests tagged; stale responses are dropped
};

const axisFormatter = new Intl.DateTimeFormat(locale, {
    month: 'numeric', day: 'numeric', hour: 'numeric', minute: 'numeric',
});

function toInputValue(date) {
    const pad = n => String(n).padStart(2, '0');
    return `${date.getFullYear()}-${pad(date.getMonth() + 1)}-${pad(date.getDate())}T${pad(date.getHours())}:${pad(date.getMinutes())}`;
}

function rangeQuery() {
    const params = new URLSearchParams();
    const start = document.getElementById('start-input').value;
    const end = document.getElementById('end-input').value;
    if (start) params.append('startDate', new Date(start).toISOString());
    if (end) params.append('endDate', new Date(end).toISOString());
    return params;
}

function showError(message) {
    const el = document.getElementById('error');
    el.textContent = (state.labels ? state.labels.error : 'Error') + ': ' + message;
    el.classList.remove('hidden');
    document.getElementById('chart-section').classList.add('hidden');
    document.getElementById('stats-section').classList.add('hidden');
}

function clearError() {
    document.getElementById('error').classList.add('hidden');
    document.getElementById('chart-section').classList.remove('hidden');
    document.getElementById('stats-section').classList.remove('hidden');
}

function drawChart(points) {
    if (state.chart) {
        state.chart.destroy();
        state.chart = null;
    }

    const xs = points.map(p => new Date(p.timestamp).getTime() / 1000);
    const ys = points.map(p => p.value);
    const container = document.getElementById('chart');
    container.innerHTML = '';

    const seriesLabel = state.labels ? state.labels.chart : 'Height (cm)';
    state.chart = new uPlot({
        width: container.clientWidth || 1000,
        height: 360,
        series: [
            {},
            { label: seriesLabel, stroke: '#2563eb', width: 2 },
        ],
        axes: [
            { values: (u, ticks) => ticks.map(t => axisFormatter.format(new Date(t * 1000))) },
            { label: seriesLabel },
        ],
    }, [xs, ys], container);
}

function renderLabels(labels) {
    state.labels = labels;
    document.getElementById('range-label').textContent = labels.dateRange;
    document.getElementById('th-height').textContent = labels.height;
    document.getElementById('th-times').textContent = labels.times;
    document.getElementById('label-max').textContent = labels.maximum;
    document.getElementById('label-median').textContent = labels.median;
}

function renderStats(stats) {
    renderLabels(stats.labels);

    const unit = v => v === stats.labels.placeholder ? v : `${v} ${stats.labels.unit}`;
    document.getElementById('max-value').textContent = unit(stats.maxValueDisplay);
    document.getElementById('median-value').textContent = unit(stats.medianValueDisplay);
    document.getElementById('max-times').innerHTML = stats.maxTimestampsDisplay.length
        ? stats.maxTimestampsDisplay.map(t => `<div>${t}</div>`).join('')
        : '-';
}

function loadRange() {
    const seq = ++state.rangeSeq;
    const params = rangeQuery();

    document.getElementById('loading').textContent = state.labels ? state.labels.loading : 'Loading...';
    clearError();

    // Chart and stats fetches race independently; each guards on the tag.
    api(`/api/timeseries?${params}`)
        .then(points => {
            if (seq !== state.rangeSeq) return;
            document.getElementById('loading').textContent = '';
            drawChart(points);
        })
        .catch(err => {
            if (seq !== state.rangeSeq) return;
            document.getElementById('loading').textContent = '';
            showError(err.message);
        });

    const statsParams = new URLSearchParams(params);
    statsParams.append('locale', locale);
    api(`/api/stats?${statsParams}`)
        .then(stats => {
            if (seq !== state.rangeSeq) return;
            renderStats(stats);
        })
        .catch(err => {
            if (seq !== state.rangeSeq) return;
            showError(err.message);
        });
}

function loadToday() {
    const midnight = new Date();
    midnight.setHours(0, 0, 0, 0);

    const params = new URLSearchParams();
    params.append('startDate', midnight.toISOString());
    params.append('locale', locale);

    // Independent of the range fetches; updates only the header strip.
    api(`/api/stats?${params}`)
        .then(stats => {
            const strip = document.getElementById('today-strip');
            strip.innerHTML =
                `${stats.labels.today}: ${stats.labels.maximum} <strong>${stats.maxValueDisplay} ${stats.labels.unit}</strong>` +
                ` &middot; ${stats.labels.median} <strong>${stats.medianValueDisplay} ${stats.labels.unit}</strong>`;
        })
        .catch(() => {
            document.getElementById('today-strip').textContent = '';
        });
}

function init() {
    const end = new Date();
    const start = new Date(end.getTime() - 24 * 3600000);
    document.getElementById('start-input').value = toInputValue(start);
    document.getElementById('end-input').value = toInputValue(end);

    document.getElementById('apply-btn').addEventListener('click', loadRange);

    loadRange();
    loadToday();
}

init();
</script>
</body>
</html>"##;

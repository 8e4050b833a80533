//! Dashboard - presentation adapter over the sentiment core.
//!
//! Owns the cached feed and the configured core components, turns each refresh
//! into a serializable view and renders views as terminal text. No sentiment
//! logic lives here.

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{error, info};

use crate::config::DashboardConfig;
use crate::feed::{CachedFeed, CommentSource};
use crate::sentiment::{
    AggregateReport, AnalysisPacket, SentimentAggregator, WordFrequency, WordFrequencyExtractor,
};

pub const NO_COMMENTS_MESSAGE: &str = "Ainda não há comentários. Seja o primeiro a participar!";
pub const NO_WORDS_MESSAGE: &str = "Não há palavras suficientes para gerar a nuvem.";
pub const NO_SENTIMENT_MESSAGE: &str = "Não há dados de sentimento para exibir.";

const BAR_WIDTH: usize = 20;

/// One rendered refresh of the live dashboard
#[derive(Debug, Clone, Serialize)]
pub struct DashboardView {
    pub source: String,
    pub fetched_at: DateTime<Utc>,
    /// Rows dropped as missing before aggregation
    pub dropped: usize,
    pub report: AggregateReport,
    pub top_words: Vec<WordFrequency>,
}

/// Outcome of a dashboard refresh
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum DashboardState {
    Ready(DashboardView),
    /// The feed loaded but holds no comments
    NoComments,
    /// The feed could not be loaded
    Unavailable { reason: String },
}

/// Live dashboard over a comment source
pub struct Dashboard<S> {
    feed: CachedFeed<S>,
    aggregator: SentimentAggregator,
    words: WordFrequencyExtractor,
    tail_size: usize,
}

impl<S: CommentSource> Dashboard<S> {
    pub fn new(source: S, aggregator: SentimentAggregator, config: &DashboardConfig) -> Self {
        Self {
            feed: CachedFeed::new(source, config.refresh_interval()),
            aggregator,
            words: WordFrequencyExtractor::with_config(2, config.top_words),
            tail_size: config.tail_size,
        }
    }

    /// Rebuilds the view, reusing the cached feed while it is fresh
    pub fn refresh(&mut self) -> DashboardState {
        let source = self.feed.source().name();

        let snapshot = match self.feed.load() {
            Ok(snapshot) => snapshot,
            Err(e) => {
                error!("Dashboard refresh failed: {}", e);
                return DashboardState::Unavailable {
                    reason: e.to_string(),
                };
            }
        };

        if snapshot.comments.is_empty() {
            return DashboardState::NoComments;
        }

        let report = self.aggregator.aggregate(&snapshot.comments, self.tail_size);
        let top_words = self.words.extract(&report.corpus, None);

        DashboardState::Ready(DashboardView {
            source,
            fetched_at: snapshot.fetched_at,
            dropped: snapshot.dropped,
            report,
            top_words,
        })
    }

    /// Clears the feed cache first ("Atualizar Dados")
    pub fn force_refresh(&mut self) -> DashboardState {
        info!("Manual refresh requested");
        self.feed.invalidate();
        self.refresh()
    }

    pub fn is_stale(&self) -> bool {
        self.feed.is_stale()
    }
}

fn bar(fraction: f64, width: usize) -> String {
    let filled = ((fraction.clamp(0.0, 1.0) * width as f64).round() as usize).min(width);
    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}

/// Renders a dashboard state as terminal text
pub fn render_dashboard(state: &DashboardState) -> String {
    let mut lines = vec!["📊 Dashboard de Sentimentos ao Vivo".to_string()];

    let view = match state {
        DashboardState::Ready(view) => view,
        DashboardState::NoComments => {
            lines.push(format!("ℹ️  {}", NO_COMMENTS_MESSAGE));
            return lines.join("\n");
        }
        DashboardState::Unavailable { reason } => {
            lines.push(format!(
                "❌ Não foi possível carregar os dados da planilha. \
                 Verifique o caminho e as permissões de acesso. Erro: {}",
                reason
            ));
            return lines.join("\n");
        }
    };

    lines.push(format!(
        "Fonte: {} | {} comentários | atualizado {}",
        view.source,
        view.report.total,
        view.fetched_at.format("%Y-%m-%d %H:%M:%S UTC")
    ));

    lines.push(String::new());
    lines.push("Sentimento Geral".to_string());
    let distribution = view.report.distribution();
    if distribution.is_empty() {
        lines.push(format!("  {}", NO_SENTIMENT_MESSAGE));
    }
    for share in distribution {
        lines.push(format!(
            "  {:<10} {} {:>5.1}% ({})",
            share.label.label(),
            bar(share.percent / 100.0, BAR_WIDTH),
            share.percent,
            share.count
        ));
    }

    lines.push(String::new());
    lines.push("Nuvem de Palavras".to_string());
    if view.top_words.is_empty() {
        lines.push(format!("  {}", NO_WORDS_MESSAGE));
    } else {
        let words: Vec<String> = view
            .top_words
            .iter()
            .map(|w| format!("{} ({})", w.word, w.frequency))
            .collect();
        lines.push(format!("  {}", words.join(", ")));
    }

    lines.push(String::new());
    lines.push("Últimos Comentários".to_string());
    for entry in &view.report.tail {
        lines.push(format!(
            "  [{:<10}] {}",
            entry.result.label.label(),
            entry.comment
        ));
    }

    lines.join("\n")
}

/// Renders an individual analysis as terminal text
pub fn render_analysis(packet: &AnalysisPacket) -> String {
    let confidence = packet.result.confidence as f64;

    [
        "🧠 Classificador de Sentimentos em Português".to_string(),
        format!("Texto: {}", packet.text),
        String::new(),
        "Resultado da Análise:".to_string(),
        format!("  Sentimento Identificado: {}", packet.result.label),
        format!(
            "  {} Confiança: {:.1}%",
            bar(confidence, BAR_WIDTH),
            confidence * 100.0
        ),
        String::new(),
        "Plano de Ação Sugerido:".to_string(),
        format!("  - Prioridade: {}", packet.plan.priority),
        format!("  - Recomendações: {}", packet.plan.recommendation),
    ]
    .join("\n")
}

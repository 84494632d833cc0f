//! Report-page registry and gated dispatch.
//!
//! The registry is the single declarative source for the permission table:
//! every report page, its navigation label, and the roles allowed to open
//! it. Report rendering itself (SQL, charts) lives with the dashboard
//! pages; this module only decides reachability.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};
use paineis_access::{AccessDecision, PageAccess, PageEntry, PageId, PermissionTable, Role};
use serde::Serialize;
use std::sync::Arc;

use crate::auth::{AppState, OptionalAuth};

/// Roles with access to the general sales/cost reports.
const REPORT_ROLES: &[&str] = &[
    "Gestor",
    "Encarregado",
    "VENDAS",
    "Estagiário de TI",
    "Sócio",
    "Desenvolvedora de Software",
];

/// Roles with access to the management indicators.
const MANAGEMENT_ROLES: &[&str] = &[
    "Gestor",
    "Encarregado",
    "Estagiário de TI",
    "Sócio",
    "Desenvolvedora de Software",
];

/// Roles with access to the fleet/purchasing reports.
const FLEET_ROLES: &[&str] = &[
    "Gestor",
    "Contas_pagar",
    "Compras",
    "Estagiário de TI",
    "Sócio",
];

fn roles(names: &[&str]) -> PageAccess {
    PageAccess::Roles(names.iter().map(|name| Role::new(*name)).collect())
}

/// Builds the page registry.
///
/// Order here is navigation order.
pub fn default_registry() -> PermissionTable {
    PermissionTable::new(vec![
        PageEntry::new("painel", "Dashboard e métricas da Auto Geral", PageAccess::Public),
        PageEntry::new("centro-custo", "Centro de custo", roles(REPORT_ROLES)),
        PageEntry::new("custo-entrega", "Custo de entrega", roles(REPORT_ROLES)),
        PageEntry::new("custos", "Custos", roles(REPORT_ROLES)),
        PageEntry::new("mapa-calor", "Mapa de calor", roles(MANAGEMENT_ROLES)),
        PageEntry::new(
            "modo-venda-itens-curva",
            "Vendas itens e curva",
            roles(REPORT_ROLES),
        ),
        PageEntry::new(
            "modo-vendas-sem-curva",
            "Vendas sem curva",
            roles(REPORT_ROLES),
        ),
        PageEntry::new(
            "entrega-em-40",
            "Indicadores de entregas",
            roles(MANAGEMENT_ROLES),
        ),
        PageEntry::new(
            "abastecimento-veic",
            "Custo combustível da frota",
            roles(FLEET_ROLES),
        ),
        PageEntry::new("entrega-logistica", "Entrega logística", roles(FLEET_ROLES)),
    ])
}

/// Page shell returned to the dashboard front end once access is granted.
#[derive(Debug, Serialize)]
struct PageShell {
    id: String,
    label: String,
}

/// Gated page dispatch.
pub async fn page(
    State(state): State<Arc<AppState>>,
    Path(page_id): Path<String>,
    OptionalAuth(session): OptionalAuth,
) -> Response {
    let page = PageId::from(page_id);
    match state.engine.decide(session.as_ref(), &page) {
        AccessDecision::Granted => {
            // decide() only grants registered pages.
            let entry = state.engine.table().get(&page);
            let label = entry.map(PageEntry::label).unwrap_or_default();
            Json(PageShell {
                id: page.to_string(),
                label: label.to_string(),
            })
            .into_response()
        }
        AccessDecision::RedirectToLogin => Redirect::to("/auth/login").into_response(),
        AccessDecision::NoRoleAssigned => (
            StatusCode::FORBIDDEN,
            "Seu perfil não possui cargo definido. Entre em contato com o suporte.",
        )
            .into_response(),
        AccessDecision::Denied => (StatusCode::FORBIDDEN, "Acesso negado.").into_response(),
    }
}

//! Content filtering handler: apply or clear allow/block URL patterns on
//! tag-matched appliance networks.
//!
//! Mutations run sequentially per network. A pattern appearing in both
//! lists is fatal before anything is sent; a per-network API failure is
//! flagged and the remaining networks still get their update.

use meraki_api::types::ContentFilteringUpdate;
use meraki_core::{
    FilterLists, NetworkSelector, OrgSelector, resolve_networks, resolve_organization,
};

use crate::cli::ContentFilterArgs;
use crate::commands::Context;
use crate::error::CliError;

/// Category list size the Dashboard requires on every update.
const URL_CATEGORY_LIST_SIZE: &str = "fullList";

pub async fn handle(ctx: &Context, args: ContentFilterArgs) -> Result<(), CliError> {
    let lists = if args.clear {
        ctx.console.note("Clearing content filter for targets");
        FilterLists::default()
    } else {
        let lists = FilterLists::load(&args.lists_dir);
        let overlap = lists.overlap();
        if !overlap.is_empty() {
            return Err(CliError::Validation {
                field: "filter lists".into(),
                reason: format!(
                    "allow and block lists share entries: {}",
                    overlap.join(", ")
                ),
            });
        }
        lists
    };

    let selector = OrgSelector::from_flags(Some(args.org_name.clone()), None)?;
    let org = resolve_organization(&ctx.api, &selector).await?;
    ctx.console
        .note(&format!("Analyzing organization {}", org.name));

    let net_selector = NetworkSelector::default().with_tag(Some(args.tag.clone()));
    let networks = resolve_networks(&ctx.api, &org.id, &net_selector).await?;
    if networks.is_empty() {
        ctx.console
            .skip(&format!("No networks carry the tag '{}'", args.tag));
        return Ok(());
    }

    let update = ContentFilteringUpdate {
        allowed_url_patterns: lists.allow.clone(),
        blocked_url_patterns: lists.block.clone(),
        blocked_url_categories: None,
        url_category_list_size: URL_CATEGORY_LIST_SIZE.into(),
    };

    for network in &networks {
        ctx.console.network(&network.name);

        let current = match ctx.api.get_content_filtering(&network.id).await {
            Ok(current) => current,
            Err(err) => {
                ctx.console.flag(&format!("{}: {err}", network.name));
                continue;
            }
        };
        tracing::debug!(network = %network.name, ?current, "current content filter");

        // Skip the write when the patterns already match.
        if current.allowed_url_patterns == lists.allow
            && current.blocked_url_patterns == lists.block
        {
            ctx.console
                .skip(&format!("{}: filter already matches", network.name));
            continue;
        }

        match ctx.api.update_content_filtering(&network.id, &update).await {
            Ok(_) => {
                if args.clear {
                    ctx.console
                        .success(&format!("{}: content filter cleared", network.name));
                } else {
                    ctx.console
                        .success(&format!("{}: content filter applied", network.name));
                }
            }
            Err(err) => ctx.console.flag(&format!("{}: {err}", network.name)),
        }
    }

    Ok(())
}

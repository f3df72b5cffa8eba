//! VLAN addressing viewer and interactive rewriter for template-bound
//! appliance networks.
//!
//! The rewrite loop validates every entry against the template's CIDR
//! envelope before anything is sent: an address must sit inside the
//! template subnet, and a subnet must nest inside the template CIDR.
//! Invalid input re-prompts; the payload is only ever built from
//! validated values.

use std::collections::HashMap;
use std::net::IpAddr;

use dialoguer::{Confirm, Input};
use ipnet::IpNet;
use meraki_api::types::{ApplianceVlan, VlanId, VlanUpdate};
use meraki_core::{NetworkSelector, OrgSelector, resolve_networks, resolve_organization};
use tabled::Tabled;

use crate::cli::MxAddressArgs;
use crate::commands::Context;
use crate::error::CliError;
use crate::output;

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct VlanRow {
    #[tabled(rename = "VLAN")]
    vlan: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "MX IP")]
    mx_ip: String,
    #[tabled(rename = "Subnet")]
    subnet: String,
    #[tabled(rename = "Template envelope")]
    envelope: String,
}

// ── Validation ──────────────────────────────────────────────────────

fn parse_ip(raw: &str) -> Result<IpAddr, String> {
    raw.trim()
        .parse()
        .map_err(|_| format!("IP address is invalid: {raw}"))
}

fn parse_subnet(raw: &str) -> Result<IpNet, String> {
    raw.trim()
        .parse()
        .map_err(|_| format!("IP subnet is invalid: {raw}"))
}

fn ip_in_cidr(ip: IpAddr, cidr: &IpNet) -> Result<(), String> {
    if cidr.contains(&ip) {
        Ok(())
    } else {
        Err(format!("IP address {ip} is not in the template subnet {cidr}"))
    }
}

fn subnet_in_cidr(subnet: &IpNet, cidr: &IpNet) -> Result<(), String> {
    if cidr.contains(subnet) {
        Ok(())
    } else {
        Err(format!("subnet {subnet} is not inside the template CIDR {cidr}"))
    }
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(ctx: &Context, args: MxAddressArgs) -> Result<(), CliError> {
    let selector = OrgSelector::from_flags(Some(args.org_name.clone()), None)?;
    let org = resolve_organization(&ctx.api, &selector).await?;

    let net_selector = NetworkSelector::default().with_name(Some(args.network.clone()));
    let networks = resolve_networks(&ctx.api, &org.id, &net_selector).await?;
    let network = networks.first().ok_or_else(|| CliError::NetworkNotFound {
        identifier: args.network.clone(),
    })?;

    let template_id =
        network
            .config_template_id
            .as_ref()
            .ok_or_else(|| CliError::Validation {
                field: "network".into(),
                reason: format!("{} is not bound to a configuration template", network.name),
            })?;

    let templates = ctx
        .api
        .list_organization_config_templates(&org.id)
        .await?;
    let template_name = templates
        .iter()
        .find(|t| &t.id == template_id)
        .map(|t| t.name.clone())
        .unwrap_or_default();

    let template_vlans: HashMap<VlanId, ApplianceVlan> = ctx
        .api
        .list_appliance_vlans(template_id)
        .await?
        .into_iter()
        .map(|v| (v.id.clone(), v))
        .collect();

    let devices = ctx.api.list_network_devices(&network.id).await?;
    let spoke = devices.first().ok_or_else(|| CliError::NotFound {
        resource: "appliance".into(),
        identifier: network.name.clone(),
    })?;

    println!();
    println!("NetworkID:  {}   Network:  {}", network.id, network.name);
    println!("TemplateID: {template_id}   Template: {template_name}");
    println!();
    println!("MX Name: {}", spoke.name.as_deref().unwrap_or("-"));
    println!(
        "Serial:  {}   MAC: {}",
        spoke.serial,
        spoke.mac.as_deref().unwrap_or("-")
    );
    println!();

    let subnets = ctx.api.list_appliance_vlans(&network.id).await?;

    let rows: Vec<VlanRow> = subnets
        .iter()
        .map(|vlan| {
            let envelope = template_vlans.get(&vlan.id).map_or_else(String::new, |tv| {
                format!(
                    "/{} in {}",
                    tv.mask.map(|m| m.to_string()).unwrap_or_default(),
                    tv.cidr.as_deref().unwrap_or("-")
                )
            });
            VlanRow {
                vlan: vlan.id.to_string(),
                name: vlan.name.clone(),
                mx_ip: vlan.appliance_ip.clone().unwrap_or_default(),
                subnet: vlan.subnet.clone().unwrap_or_default(),
                envelope,
            }
        })
        .collect();
    println!("Addressing & VLANs");
    println!("{}", output::render_table(&rows));

    if args.rewrite {
        for vlan in &subnets {
            rewrite_vlan(ctx, &network.id, vlan, template_vlans.get(&vlan.id)).await?;
        }
    }

    Ok(())
}

/// Confirm and rewrite one VLAN's addressing with validated input.
async fn rewrite_vlan(
    ctx: &Context,
    network_id: &str,
    vlan: &ApplianceVlan,
    template: Option<&ApplianceVlan>,
) -> Result<(), CliError> {
    let Some(cidr) = template.and_then(|tv| tv.cidr.as_deref()) else {
        ctx.console.skip(&format!(
            "VLAN {}: no template CIDR, cannot validate a rewrite",
            vlan.id
        ));
        return Ok(());
    };
    let cidr: IpNet = cidr.parse().map_err(|_| CliError::Validation {
        field: "template cidr".into(),
        reason: format!("template CIDR for VLAN {} is invalid: {cidr}", vlan.id),
    })?;

    let proceed = Confirm::new()
        .with_prompt(format!("Rewrite VLAN {}?", vlan.id))
        .default(false)
        .interact()
        .map_err(prompt_failed)?;
    if !proceed {
        return Ok(());
    }

    let mx_ip: String = Input::new()
        .with_prompt("Enter MX IP")
        .validate_with(|input: &String| -> Result<(), String> {
            let ip = parse_ip(input)?;
            ip_in_cidr(ip, &cidr)
        })
        .interact_text()
        .map_err(prompt_failed)?;

    let subnet: String = Input::new()
        .with_prompt("Enter Subnet")
        .validate_with(|input: &String| -> Result<(), String> {
            let net = parse_subnet(input)?;
            subnet_in_cidr(&net, &cidr)
        })
        .interact_text()
        .map_err(prompt_failed)?;

    let update = VlanUpdate {
        appliance_ip: mx_ip.trim().to_owned(),
        subnet: subnet.trim().to_owned(),
    };
    let result = ctx
        .api
        .update_appliance_vlan(network_id, &vlan.id, &update)
        .await?;

    ctx.console.success(&format!(
        "VLAN {} ({}) now {} / MX IP {}",
        result.id,
        result.name,
        result.subnet.as_deref().unwrap_or("-"),
        result.appliance_ip.as_deref().unwrap_or("-")
    ));

    Ok(())
}

fn prompt_failed(err: dialoguer::Error) -> CliError {
    CliError::Internal {
        message: format!("prompt failed: {err}"),
    }
}

// ── Tests ────────────────────────────────────────────────────────────

use ad_exchange::config::cli::{CliConfig, Command};
use ad_exchange::config::{CatalogConfig, ExchangeConfig};
use ad_exchange::utils::{logger, report, validation::Validate};
use ad_exchange::{
    Ad, AdCatalog, AdDraft, AdFilter, AdId, AdService, ExchangeProposal, ExchangeService,
    ExchangeState, HttpAdCatalog, LocalStateStorage, MemoryCatalog, MemoryProposalStore,
    ProposalId, ProposalStore, Result, UserId,
};
use clap::Parser;
use std::time::Duration;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    logger::init_cli_logger(cli.verbose);

    tracing::info!("Starting ad-exchange CLI");
    if cli.verbose {
        tracing::debug!("CLI config: {:?}", cli);
    }

    if let Err(e) = run(cli).await {
        if e.is_rejection() {
            tracing::error!("request rejected: {}", e);
            eprintln!("❌ {}", e);
            std::process::exit(2);
        }
        return Err(anyhow::Error::new(e).context("ad-exchange failed"));
    }

    Ok(())
}

async fn run(cli: CliConfig) -> Result<()> {
    let (data_dir, remote_catalog) = resolve_config(&cli)?;

    let storage = LocalStateStorage::new(data_dir);
    let state = storage.load()?;
    let catalog = MemoryCatalog::from_snapshot(state.catalog);
    let store = MemoryProposalStore::from_snapshot(state.proposals);
    let acting = UserId(cli.user);

    match remote_catalog {
        Some(remote) => {
            let http = match remote.timeout_seconds {
                Some(seconds) => {
                    HttpAdCatalog::with_timeout(&remote.endpoint, Duration::from_secs(seconds))?
                }
                None => HttpAdCatalog::new(&remote.endpoint),
            };
            tracing::info!("using remote ad catalog at {}", remote.endpoint);
            dispatch_remote(&cli.command, acting, http, store.clone()).await?;
        }
        None => dispatch_local(&cli.command, acting, catalog.clone(), store.clone()).await?,
    }

    storage.save(&ExchangeState {
        catalog: catalog.snapshot().await,
        proposals: store.snapshot().await,
    })?;

    Ok(())
}

fn resolve_config(cli: &CliConfig) -> Result<(String, Option<CatalogConfig>)> {
    match &cli.config {
        Some(path) => {
            let config = ExchangeConfig::from_file(path)?;
            config.validate()?;
            Ok((config.storage.data_dir.clone(), config.catalog.clone()))
        }
        None => Ok((cli.data_dir.clone(), None)),
    }
}

async fn dispatch_local(
    command: &Command,
    acting: UserId,
    catalog: MemoryCatalog,
    store: MemoryProposalStore,
) -> Result<()> {
    match command {
        Command::PostAd {
            title,
            description,
            category,
            condition,
            image_url,
        } => {
            let ads = AdService::new(catalog);
            let ad = ads
                .post_ad(
                    acting,
                    AdDraft {
                        title: title.clone(),
                        description: description.clone(),
                        category: *category,
                        condition: *condition,
                        image_url: image_url.clone(),
                    },
                )
                .await?;
            println!("✅ Ad {} posted: {}", ad.id, ad.title);
        }
        Command::EditAd {
            id,
            title,
            description,
            category,
            condition,
            image_url,
        } => {
            let ads = AdService::new(catalog);
            let ad = ads
                .edit_ad(
                    acting,
                    AdId(*id),
                    AdDraft {
                        title: title.clone(),
                        description: description.clone(),
                        category: *category,
                        condition: *condition,
                        image_url: image_url.clone(),
                    },
                )
                .await?;
            println!("✅ Ad {} updated: {}", ad.id, ad.title);
        }
        Command::RemoveAd { id } => {
            let ads = AdService::new(catalog);
            ads.remove_ad(acting, AdId(*id)).await?;
            println!("✅ Ad {} removed", id);
        }
        Command::Ads {
            category,
            condition,
            search,
            mine,
        } => {
            let ads = AdService::new(catalog);
            let listed = if *mine {
                ads.my_ads(acting).await?
            } else {
                ads.browse(&AdFilter {
                    category: *category,
                    condition: *condition,
                    search: search.clone(),
                })
                .await?
            };
            print_ads(&listed);
        }
        other => {
            let service = ExchangeService::new(catalog, store);
            run_exchange_command(other, acting, &service).await?;
        }
    }
    Ok(())
}

async fn dispatch_remote(
    command: &Command,
    acting: UserId,
    http: HttpAdCatalog,
    store: MemoryProposalStore,
) -> Result<()> {
    match command {
        Command::PostAd { .. } | Command::EditAd { .. } | Command::RemoveAd { .. } => {
            Err(ad_exchange::ExchangeError::Unavailable {
                message: "the configured remote catalog is read-only; drop the [catalog] \
                          section to manage ads locally"
                    .to_string(),
            })
        }
        Command::Ads {
            category,
            condition,
            search,
            mine,
        } => {
            let listed = if *mine {
                http.ads_by_owner(acting).await?
            } else {
                http.browse(&AdFilter {
                    category: *category,
                    condition: *condition,
                    search: search.clone(),
                })
                .await?
            };
            print_ads(&listed);
            Ok(())
        }
        other => {
            let service = ExchangeService::new(http, store);
            run_exchange_command(other, acting, &service).await
        }
    }
}

async fn run_exchange_command<C, S>(
    command: &Command,
    acting: UserId,
    service: &ExchangeService<C, S>,
) -> Result<()>
where
    C: AdCatalog,
    S: ProposalStore,
{
    match command {
        Command::Propose {
            sender,
            receiver,
            comment,
        } => {
            let id = service
                .create_proposal(acting, AdId(*sender), AdId(*receiver), comment.clone())
                .await?;
            println!("✅ Proposal {} created: ad {} -> ad {}", id, sender, receiver);
        }
        Command::Respond { id, decision } => {
            service
                .update_status(acting, ProposalId(*id), *decision)
                .await?;
            println!("✅ Proposal {} marked {}", id, decision);
        }
        Command::Proposals {
            direction,
            status,
            export,
        } => {
            let listed = service.list_proposals(acting, *direction, *status).await?;
            match export {
                Some(path) => {
                    let file = std::fs::File::create(path)?;
                    report::write_proposals_csv(&listed, file)?;
                    println!("📁 Exported {} proposals to {}", listed.len(), path);
                }
                None => print_proposals(&listed),
            }
        }
        // Ad commands never reach this handler.
        _ => {}
    }
    Ok(())
}

fn print_ads(ads: &[Ad]) {
    if ads.is_empty() {
        println!("No ads found");
        return;
    }
    for ad in ads {
        println!(
            "#{:<4} [{}/{}] {} (owner {})",
            ad.id,
            ad.category.as_str(),
            ad.condition.as_str(),
            ad.title,
            ad.owner
        );
    }
}

fn print_proposals(proposals: &[ExchangeProposal]) {
    if proposals.is_empty() {
        println!("No proposals found");
        return;
    }
    for proposal in proposals {
        let comment = proposal.comment.as_deref().unwrap_or("-");
        println!(
            "#{:<4} ad {} -> ad {} [{}] {}",
            proposal.id, proposal.sender_ad, proposal.receiver_ad, proposal.status, comment
        );
    }
}

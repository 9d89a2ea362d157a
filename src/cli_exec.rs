use anyhow::{Context, Result};
use serde::Serialize;

use scopedash::git::{ORIGIN, RemoteLookup, UPSTREAM, short_display_name};
use scopedash::query::Identities;
use scopedash::search::SectionKind;
use scopedash::section::Section;

use crate::cli_runtime::Env;
use crate::{Commands, ScopeArg};

pub(crate) fn handle_command(command: Commands, env: &Env) -> Result<()> {
    match command {
        Commands::Remotes { json } => remotes(env, json),
        Commands::Query {
            section,
            issues,
            raw,
            no_author,
            scope,
            custom,
            json,
        } => query(
            env,
            QueryArgs {
                section,
                issues,
                raw,
                no_author,
                scope,
                custom,
                json,
            },
        ),
    }
}

#[derive(Serialize)]
struct RemoteView {
    name: &'static str,
    url: Option<String>,
    repo: Option<String>,
}

fn remotes(env: &Env, json: bool) -> Result<()> {
    let lookup = env.lookup();
    let ids = Identities::resolve(lookup.as_ref(), &env.repo_dir);
    let views = [
        remote_view(lookup.as_ref(), env, ORIGIN, ids.origin.as_ref().map(|i| i.slug())),
        remote_view(lookup.as_ref(), env, UPSTREAM, ids.upstream.as_ref().map(|i| i.slug())),
    ];

    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&views).context("serialize remotes json")?
        );
        return Ok(());
    }
    for v in views {
        match (&v.repo, &v.url) {
            (Some(repo), Some(url)) => println!("{}: {} ({})", v.name, repo, short_display_name(url)),
            (None, Some(url)) => println!("{}: {} (not a recognised remote url)", v.name, url),
            _ => println!("{}: (none)", v.name),
        }
    }
    Ok(())
}

fn remote_view(
    lookup: &dyn RemoteLookup,
    env: &Env,
    name: &'static str,
    repo: Option<String>,
) -> RemoteView {
    RemoteView {
        name,
        url: lookup.find_remote_url(&env.repo_dir, name).ok(),
        repo,
    }
}

struct QueryArgs {
    section: usize,
    issues: bool,
    raw: Option<String>,
    no_author: bool,
    scope: Option<ScopeArg>,
    custom: Option<String>,
    json: bool,
}

#[derive(Serialize)]
struct QueryView {
    section: String,
    kind: &'static str,
    scope: String,
    author_filter: bool,
    query: String,
}

fn query(env: &Env, args: QueryArgs) -> Result<()> {
    let (kind, configs) = if args.issues {
        (SectionKind::Issues, &env.config.issues_sections)
    } else {
        (SectionKind::PullRequests, &env.config.pr_sections)
    };
    let Some(cfg) = configs.get(args.section) else {
        anyhow::bail!(
            "no {} section at index {} ({} configured)",
            kind.label(),
            args.section,
            configs.len()
        );
    };

    let lookup = env.lookup();
    let ids = Identities::resolve(lookup.as_ref(), &env.repo_dir);
    let mut section = Section::new(
        args.section,
        kind,
        cfg.clone(),
        env.config.smart_filtering_at_launch,
        &ids,
    );

    if let Some(raw) = &args.raw {
        section.commit_search(raw, &ids);
    }
    if let Some(scope) = args.scope {
        let value = match scope {
            ScopeArg::Origin => ids
                .origin
                .as_ref()
                .map(|id| id.slug())
                .context("no origin remote found")?,
            ScopeArg::Upstream => ids
                .upstream
                .as_ref()
                .map(|id| id.slug())
                .context("no upstream remote found")?,
            ScopeArg::None => String::new(),
        };
        section.select_repo(&value, false, &ids);
    }
    if let Some(custom) = &args.custom {
        section.set_custom_filter(custom);
    }
    if args.no_author {
        section.toggle_author_filter();
    }

    let view = QueryView {
        section: section.title().to_string(),
        kind: kind.label(),
        scope: section.scope_label(&ids),
        author_filter: !section.scope().author_filter_removed,
        query: section.effective_query(&ids),
    };
    if args.json {
        println!(
            "{}",
            serde_json::to_string_pretty(&view).context("serialize query json")?
        );
    } else {
        println!("{}", view.query);
    }
    Ok(())
}

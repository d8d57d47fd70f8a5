//! Dialog markup: deploy, load project, pro upgrade, login prompts and the
//! invite panel.

use crate::dialogs::LoginPrompt;

use super::components::{html_escape, SITE_NAME};

fn dialog_shell(id: &str, title: &str, description: &str, body: &str) -> String {
    format!(
        r#"<div class="dialog-overlay" id="{id}" onclick="if(event.target===this)closeDialog('{id}')">
            <div class="dialog" role="dialog" aria-labelledby="{id}-title">
                <header>
                    <img src="/public/bond-media-logo.svg" alt="{site} Logo" width="120" height="40">
                    <p class="title" id="{id}-title">{title}</p>
                    <p class="description">{description}</p>
                </header>
                <main>{body}</main>
            </div>
        </div>"#,
        id = id,
        site = SITE_NAME,
        title = html_escape(title),
        description = html_escape(description),
        body = body,
    )
}

pub fn deploy_dialog() -> String {
    dialog_shell(
        "deploy-dialog",
        "Deploy your Website!",
        "Save and deploy your website project with Bond Media Studio. Share your amazing website with the world.",
        r#"<div>
                <label for="deploy-title">Choose a title for your website:</label>
                <input type="text" id="deploy-title" placeholder="My Awesome Website">
            </div>
            <div>
                <label>Then, let's deploy it!</label>
                <button class="btn black" id="deploy-submit" onclick="submitDeploy()">Deploy Website</button>
            </div>"#,
    )
}

pub fn load_dialog() -> String {
    dialog_shell(
        "load-dialog",
        "Import a Project",
        "Enter the URL of your Bond Media Studio project to import an existing website.",
        r#"<div>
                <label for="load-url">Enter your Bond Media Studio Project</label>
                <input type="text" id="load-url" placeholder="https://bondmediastudio.com/projects/username/project" onblur="normalizeProjectUrl(this)">
            </div>
            <div>
                <label>Then, let's import it!</label>
                <button class="btn black" id="load-submit" onclick="submitImport()">Import your Project</button>
            </div>"#,
    )
}

pub fn pro_modal() -> String {
    dialog_shell(
        "pro-dialog",
        "Upgrade to Bond Media Studio Pro",
        "Unlock unlimited website creation with Bond Media Studio Pro.",
        r#"<ul>
                <li>Create unlimited websites with premium templates</li>
                <li>Access to premium website templates and themes</li>
                <li>Priority support and advanced customization options</li>
                <li>... and lots more!</li>
            </ul>
            <button class="btn black" onclick="submitUpgrade()">Upgrade to Pro (Coming Soon)</button>"#,
    )
}

/// One login prompt per entry point; `key` becomes the `login-<key>` element id.
pub fn login_modal(key: &str, prompt: &LoginPrompt) -> String {
    dialog_shell(
        &format!("login-{}", key),
        prompt.title,
        prompt.description,
        &format!(
            r#"<button class="btn black" onclick="confirmLogin('login-{}')">Log In to Continue</button>"#,
            key
        ),
    )
}

pub fn login_modals() -> String {
    [
        ("default", &LoginPrompt::DEFAULT),
        ("save", &LoginPrompt::SAVE),
        ("load", &LoginPrompt::LOAD),
        ("gallery", &LoginPrompt::GALLERY),
        ("help", &LoginPrompt::HELP),
    ]
    .iter()
    .map(|(key, prompt)| login_modal(key, prompt))
    .collect()
}

pub fn invite_friends() -> String {
    dialog_shell(
        "invite-dialog",
        "Explore Bond Media's Premium Websites",
        "Discover our portfolio of custom, bespoke websites and professional web solutions.",
        r#"<a href="https://www.bondmedia.co.uk/" target="_blank" rel="noopener noreferrer">
                <button class="btn black">Visit Bond Media Website</button>
            </a>"#,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_login_modals_cover_every_entry_point() {
        let html = login_modals();
        for id in ["login-default", "login-save", "login-load", "login-gallery", "login-help"] {
            assert!(html.contains(&format!("id=\"{}\"", id)), "{}", id);
        }
        assert!(html.contains("Log In to get Help"));
    }

    #[test]
    fn test_load_dialog_placeholder() {
        assert!(load_dialog().contains("https://bondmediastudio.com/projects/username/project"));
    }

    #[test]
    fn test_dialog_text_is_escaped() {
        let html = deploy_dialog();
        assert!(html.contains("Deploy your Website!"));
        let html = invite_friends();
        assert!(html.contains("Bond Media&#39;s"));
    }
}

//! Git fetching of URL template sources.
//!
//! URL sources are cloned into the clone cache and updated on subsequent
//! use. Clones are named after the repository (URL basename minus `.git`),
//! so a failed URL source can be retried as `<repo-name>/<subdir>` against
//! the cache.

use anyhow::{bail, Result};
use std::path::{Path, PathBuf};

/// Fetches templates from git repositories.
pub struct GitFetcher {
    /// Directory for cloned repositories.
    clone_dir: PathBuf,
}

impl GitFetcher {
    /// Create a new git fetcher.
    pub fn new(clone_dir: impl Into<PathBuf>) -> Self {
        Self {
            clone_dir: clone_dir.into(),
        }
    }

    /// Get the clone directory.
    pub fn clone_dir(&self) -> &PathBuf {
        &self.clone_dir
    }

    /// Repository name for a URL: the last path segment, minus `.git`.
    pub fn repo_name(url: &str) -> String {
        let trimmed = url.trim_end_matches('/');
        let base = trimmed
            .rsplit(|c: char| c == '/' || c == ':')
            .next()
            .unwrap_or(trimmed);
        base.strip_suffix(".git").unwrap_or(base).to_string()
    }

    /// The local path a repository clones to.
    pub fn repo_path(&self, url: &str) -> PathBuf {
        self.clone_dir.join(Self::repo_name(url))
    }

    /// Clone or update a repository, returning its local path.
    pub fn fetch(&self, url: &str, git_ref: Option<&str>) -> Result<PathBuf> {
        let repo_path = self.repo_path(url);

        if repo_path.exists() {
            self.update_repo(&repo_path, git_ref)?;
        } else {
            self.clone_repo(url, &repo_path, git_ref)?;
        }

        Ok(repo_path)
    }

    fn clone_repo(&self, url: &str, path: &Path, git_ref: Option<&str>) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let mut cmd = std::process::Command::new("git");
        cmd.args(["clone", "--depth", "1"]);

        if let Some(r) = git_ref {
            cmd.args(["--branch", r]);
        }

        cmd.args([url, &path.to_string_lossy()]);

        let output = cmd.output()?;
        if !output.status.success() {
            bail!(
                "Git clone failed: {}",
                String::from_utf8_lossy(&output.stderr)
            );
        }

        Ok(())
    }

    fn update_repo(&self, path: &PathBuf, git_ref: Option<&str>) -> Result<()> {
        let output = std::process::Command::new("git")
            .args(["fetch", "origin"])
            .current_dir(path)
            .output()?;

        if !output.status.success() {
            bail!(
                "Git fetch failed: {}",
                String::from_utf8_lossy(&output.stderr)
            );
        }

        let refspec = if let Some(r) = git_ref {
            format!("origin/{}", r)
        } else {
            "origin/HEAD".to_string()
        };

        let output = std::process::Command::new("git")
            .args(["reset", "--hard", &refspec])
            .current_dir(path)
            .output()?;

        if !output.status.success() {
            bail!(
                "Git reset failed: {}",
                String::from_utf8_lossy(&output.stderr)
            );
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;
    use tempfile::TempDir;

    // Serialize git-process tests to avoid flaky failures under parallel execution
    static GIT_LOCK: Mutex<()> = Mutex::new(());

    #[test]
    fn creates_fetcher_with_clone_dir() {
        let temp = TempDir::new().unwrap();
        let fetcher = GitFetcher::new(temp.path());

        assert_eq!(fetcher.clone_dir(), temp.path());
    }

    #[test]
    fn repo_name_strips_git_suffix() {
        assert_eq!(
            GitFetcher::repo_name("https://github.com/org/my-repo.git"),
            "my-repo"
        );
        assert_eq!(
            GitFetcher::repo_name("https://github.com/org/my-repo"),
            "my-repo"
        );
        assert_eq!(
            GitFetcher::repo_name("https://github.com/org/my-repo/"),
            "my-repo"
        );
    }

    #[test]
    fn repo_name_handles_scp_style_urls() {
        assert_eq!(
            GitFetcher::repo_name("git@github.com:org/my-repo.git"),
            "my-repo"
        );
    }

    #[test]
    fn repo_path_uses_repo_name() {
        let temp = TempDir::new().unwrap();
        let fetcher = GitFetcher::new(temp.path());

        let path = fetcher.repo_path("https://github.com/org/my-repo.git");
        assert_eq!(path, temp.path().join("my-repo"));
    }

    #[test]
    fn invalid_repo_url_returns_error() {
        let _lock = GIT_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        let temp = TempDir::new().unwrap();
        let fetcher = GitFetcher::new(temp.path().join("clones"));

        let result = fetcher.fetch("/nonexistent/path/repo.git", Some("main"));

        assert!(result.is_err());
    }

    /// Create a bare git repo with an initial commit containing a manifest.
    fn create_bare_repo(parent: &Path) -> PathBuf {
        let bare_path = parent.join("fixture.git");
        let work_dir = parent.join("work");
        std::fs::create_dir_all(&work_dir).unwrap();

        let output = std::process::Command::new("git")
            .args([
                "init",
                "--bare",
                "--initial-branch=main",
                bare_path.to_string_lossy().as_ref(),
            ])
            .output()
            .unwrap();
        assert!(output.status.success(), "bare init failed");

        let output = std::process::Command::new("git")
            .args([
                "clone",
                bare_path.to_string_lossy().as_ref(),
                work_dir.to_string_lossy().as_ref(),
            ])
            .output()
            .unwrap();
        assert!(output.status.success(), "clone failed");

        for (key, val) in [("user.name", "Test"), ("user.email", "test@test.com")] {
            let output = std::process::Command::new("git")
                .args(["config", key, val])
                .current_dir(&work_dir)
                .output()
                .unwrap();
            assert!(output.status.success(), "git config {key} failed");
        }

        std::fs::write(
            work_dir.join("template.yml"),
            "description: fixture\nvariables: []\n",
        )
        .unwrap();

        let output = std::process::Command::new("git")
            .args(["add", "."])
            .current_dir(&work_dir)
            .output()
            .unwrap();
        assert!(output.status.success(), "git add failed");

        let output = std::process::Command::new("git")
            .args(["commit", "-m", "Initial commit"])
            .current_dir(&work_dir)
            .output()
            .unwrap();
        assert!(
            output.status.success(),
            "git commit failed: {}",
            String::from_utf8_lossy(&output.stderr)
        );

        let output = std::process::Command::new("git")
            .args(["push", "origin", "HEAD:main"])
            .current_dir(&work_dir)
            .output()
            .unwrap();
        assert!(
            output.status.success(),
            "git push failed: {}",
            String::from_utf8_lossy(&output.stderr)
        );

        bare_path
    }

    #[test]
    fn clone_from_local_bare_repo() {
        let _lock = GIT_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        let temp = TempDir::new().unwrap();
        let bare_path = create_bare_repo(temp.path());

        let clone_dir = temp.path().join("clones");
        let fetcher = GitFetcher::new(&clone_dir);

        let local = fetcher
            .fetch(&bare_path.to_string_lossy(), Some("main"))
            .unwrap();

        assert_eq!(local, clone_dir.join("fixture"));
        assert!(local.join("template.yml").exists());

        // A second fetch updates the existing clone in place.
        let again = fetcher
            .fetch(&bare_path.to_string_lossy(), Some("main"))
            .unwrap();
        assert_eq!(again, local);
    }
}

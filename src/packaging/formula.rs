pub const HOMEPAGE: &str = "https://github.com/todda86/cyberark-ssh";
pub const LICENSE: &str = "MIT";
const DESCRIPTION: &str = "CLI wrapper that simplifies SSH/SCP through CyberArk PSMP";

/// A published source release, as pinned by the Homebrew formula.
#[derive(Debug, Clone)]
pub struct Release {
    pub homepage: String,
    pub url: String,
    pub version: String,
    pub sha256: String,
    pub license: String,
}

impl Release {
    /// Release of `version` hosted as a tag archive at the public homepage.
    pub fn tagged_at(version: impl Into<String>, sha256: impl Into<String>) -> Self {
        let version = version.into();
        Self {
            homepage: HOMEPAGE.to_string(),
            url: format!("{HOMEPAGE}/archive/refs/tags/v{version}.tar.gz"),
            version,
            sha256: sha256.into(),
            license: LICENSE.to_string(),
        }
    }
}

/// Render the `CyberarkSsh` formula. There is one class per package name, so a
/// tap can only ever carry a single variant of it.
pub fn render(release: &Release) -> String {
    format!(
        r##"class CyberarkSsh < Formula
  desc "{DESCRIPTION}"
  homepage "{homepage}"
  url "{url}"
  version "{version}"
  sha256 "{sha256}"
  license "{license}"

  depends_on "rust" => :build

  def install
    system "cargo", "install", *std_cargo_args
  end

  def post_install
    config = "#{{Dir.home}}/.cyberark-ssh.yaml"
    unless File.exist?(config)
      ohai "Run 'cyberark-ssh init' to create a starter config at #{{config}}"
    end
  end

  test do
    assert_match "CyberArk SSH wrapper", shell_output("#{{bin}}/cyberark-ssh help 2>&1", 0)
  end
end
"##,
        homepage = release.homepage,
        url = release.url,
        version = release.version,
        sha256 = release.sha256,
        license = release.license,
    )
}

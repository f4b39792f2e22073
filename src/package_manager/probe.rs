//! 检测系统中可用的包管理器

use super::Source;

/// 启动时探测到的各包管理器可用性，之后只读
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Capabilities {
    pub apt: bool,
    pub nala: bool,
    pub pacstall: bool,
    pub flatpak: bool,
    pub snap: bool,
}

impl Capabilities {
    /// 在 PATH 中查找每个候选可执行文件
    pub fn detect() -> Self {
        Self::detect_with(is_on_path)
    }

    pub fn detect_with(mut exists: impl FnMut(&str) -> bool) -> Self {
        let caps = Self {
            apt: exists(Source::Apt.probe_binary()),
            nala: exists("nala"),
            pacstall: exists(Source::Pacstall.probe_binary()),
            flatpak: exists(Source::Flatpak.probe_binary()),
            snap: exists(Source::Snap.probe_binary()),
        };
        log::debug!("探测结果: {:?}", caps);
        caps
    }

    pub fn has(&self, source: Source) -> bool {
        match source {
            Source::Apt => self.apt,
            Source::Pacstall => self.pacstall,
            Source::Flatpak => self.flatpak,
            Source::Snap => self.snap,
        }
    }

    /// 可用的搜索来源，按固定顺序
    pub fn available(&self) -> impl Iterator<Item = Source> + '_ {
        Source::ALL.into_iter().filter(move |s| self.has(*s))
    }
}

pub fn is_on_path(program: &str) -> bool {
    which::which(program).is_ok()
}

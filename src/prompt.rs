// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Pvbflow-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of pvbflow and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Prompts sent to the model.
//!
//! The system prompt fixes the house style (process flow, actor colours, fenced output); the
//! initial and refinement prompts carry the board and, when refining, the current diagram.

use crate::format::mermaid::fence_mermaid;
use crate::model::VisionBoard;

pub const SYSTEM_PROMPT: &str = r#"You are a business process analyst who draws operational process flow diagrams in Mermaid.

Turn Product Vision Board data into OPERATIONAL PROCESS DIAGRAMS that show:
- the sequential steps of execution
- decision points and branches
- the actors (systems, AI, humans) and what each one does
- data flows, validations and enrichment loops

Rules:
1. Draw a business process, not a concept map.
2. Show how the work happens, step by step.
3. Make clear who does what.
4. Include decisions, validations and enrichments.
5. Use a vertical layout (flowchart TD) unless asked otherwise.
6. Always put the diagram in a ```mermaid fenced code block.

Colour nodes by actor type:
- Systems / automated steps: fill #4A90D9, stroke #2E5F8A
- AI / ML steps: fill #50C878, stroke #2E8B57
- Human actors / manual tasks: fill #FF9F43, stroke #E67E22
- Objectives / results: fill #E74C3C
Use white text (color:#fff) on coloured nodes.

Example:
```mermaid
flowchart TD
    subgraph Legend
        L1[🖥️ System]
        L2[🤖 AI]
        L3[👤 Human]
    end

    A[/"📊 Data source"/] --> B{{"Data type?"}}
    B -->|"Type 1"| C1["📁 System A<br/>Fetch files"]
    B -->|"Type 2"| C2["📁 System B<br/>Fetch files"]
    C1 --> D["🤖 AI analysis"]
    C2 --> D
    D --> E["👤 Human review"]
    E --> F[/"📊 Database"/]

    style A fill:#4A90D9,stroke:#2E5F8A,color:#fff
    style D fill:#50C878,stroke:#2E8B57,color:#fff
    style E fill:#FF9F43,stroke:#E67E22,color:#fff
    style L1 fill:#4A90D9,stroke:#2E5F8A,color:#fff
    style L2 fill:#50C878,stroke:#2E8B57,color:#fff
    style L3 fill:#FF9F43,stroke:#E67E22,color:#fff
```"#;

const INITIAL_TASK: &str = r#"YOUR TASK:
Infer the complete operational business process behind the board above and draw it.

1. Workflow: from the product description, which steps happen and in which order? Which data is transformed?
2. Actors: from the target users and description, who are the humans (orange), which systems are involved (blue), where is AI or automation (green)?
3. Decisions: which conditions, validations or approvals branch the flow? Use diamond shapes {{}}.
4. Structure: start from a data source or trigger ([/ /] shape), list every processing step, end with the stored result or output ([/ /] shape).
5. Business detail: from the key features, which calculations, enrichments or operations take place?

Diagram requirements:
- flowchart TD
- a "Legend" subgraph showing the actor types
- a main process subgraph with a descriptive title
- an emoji per step type and colours per actor type
- labelled arrows where a condition applies
- short labels, <br/> for line breaks

Answer with ONLY the Mermaid diagram in a ```mermaid code block."#;

const REFINEMENT_GUIDE: &str = r#"YOUR TASK:
Change the diagram as the user asks while keeping the process logic and quality.

Layout:
- "more vertical" -> flowchart TD, nodes top to bottom
- "horizontal" -> flowchart LR
- "compact" -> group related steps in subgraphs
- "spread out" -> add intermediate steps

Visuals:
- "add colors" -> every node coloured by actor type
- "add icons" -> an emoji on every step
- "bigger" -> more <br/> line breaks in labels
- "legend" -> add or complete the "Legend" subgraph

Content:
- "more detail" -> split complex steps
- "simplify" -> merge related steps
- "add X" / "remove Y" -> insert or delete steps where they belong

Process logic:
- "add decision" -> a diamond {{}} with branches
- "add validation" -> a human validation step (orange)
- "separate actors" -> subgraphs per actor
- "add loop" -> feedback or retry arrows

Keep the actor colour code and the sequential flow unless asked otherwise, and make sure the
result is valid Mermaid.

Answer with ONLY the updated Mermaid diagram in a ```mermaid code block."#;

/// First prompt of a session: draw the process behind `board`.
pub fn initial_prompt(board: &VisionBoard) -> String {
    format!(
        "Analyze this Product Vision Board and create an OPERATIONAL PROCESS DIAGRAM:\n\n\
         {board}\n\n{INITIAL_TASK}"
    )
}

/// Follow-up prompt: apply `request` to `diagram`, with the board for context.
pub fn refinement_prompt(board: &VisionBoard, diagram: &str, request: &str) -> String {
    format!(
        "You are refining an operational business process diagram.\n\n\
         CURRENT DIAGRAM:\n{}\n\n\
         ORIGINAL PRODUCT VISION BOARD:\n{board}\n\n\
         USER REQUEST: \"{request}\"\n\n{REFINEMENT_GUIDE}",
        fence_mermaid(diagram)
    )
}

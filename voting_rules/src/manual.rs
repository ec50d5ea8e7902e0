/*!

This is the long-form manual for `voting_rules` and `vrules`.

## Input

All the rules start from a valuation matrix: one row per agent, one column per
alternative. Agents are numbered from 1 (row 1 is agent 1) and alternatives from 0
(column 1 is alternative 0).

```text
3,1,2
1,2,3
2,3,1
```

The following formats are supported by `vrules`:
* `csv` Comma Separated Values, without header by default
* `excel` Excel spreadsheets (.xlsx)

The first rows and columns may hold labels. They are skipped with the
`firstValueRowIndex` and `firstValueColumnIndex` options (both 1-based).
Every cell of the matrix must be a number.

## Preferences

The ordinal rules first convert every row into a ranking. The alternatives are
sorted by increasing valuation, and the alternative with the higher index comes
first when two valuations are equal. With the matrix above, agent 1 gets the
ranking `[1, 2, 0]`. The rules then treat the first position of a ranking as the
top choice of the agent.

## Rules

| name           | description |
|----------------|-------------|
| `dictatorship` | the top choice of the agent given with `--dictator` |
| `scoring`      | positional scoring with the weights given with `--score-vector` |
| `plurality`    | one point for the first position |
| `veto`         | one point for every position but the last |
| `borda`        | `m - 1 - i` points for position `i` |
| `harmonic`     | `1 / (i + 1)` points for position `i` |
| `stv`          | single transferable vote, eliminating all the weakest alternatives at once |
| `range`        | sums every row of the raw valuations; the winner is a 1-indexed row |

## Tie-breaking

* `max` the alternative with the greatest index
* `min` the alternative with the smallest index
* an agent number: among the tied alternatives, the one this agent ranks first

Two rules deviate for agent tie-breaks:
- `veto` returns the top choice of the agent, even if it is not one of the tied
  alternatives. The agent must be between 1 and the number of agents.
- `range` returns the column (1-indexed, among the first `n` columns for `n` rows)
  with the largest valuation in the row of the agent. With `max` and `min`, it
  returns the first row with the largest or the smallest sum.

## Configuration

`vrules` accepts a configuration file in JSON. Command line flags take precedence
over the values of the file.

```json
{
  "outputSettings": {
    "contestName": "Committee vote",
    "outputFile": "summary.json"
  },
  "valuationSource": {
    "provider": "csv",
    "filePath": "values.csv",
    "firstValueRowIndex": 1,
    "firstValueColumnIndex": 1
  },
  "rules": {
    "votingRule": "borda",
    "tiebreakMode": "max"
  }
}
```

- `valuationSource.provider` (string): `csv` or `excel`
- `valuationSource.filePath` (string): relative paths start from the directory of
  the configuration file
- `valuationSource.excelWorksheetName` (string, optional): for Excel-based inputs,
  the name of the worksheet. The workbook must have a single worksheet otherwise.
- `rules.dictator` (number, optional): the agent for the `dictatorship` rule
- `rules.scoreVector` (array of numbers, optional): the weights for the `scoring` rule

 */
